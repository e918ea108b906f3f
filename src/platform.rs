use std::io::Cursor;
use std::path::PathBuf;

use crate::error::{PlannerError, Result};

/// Host facilities the screens delegate to: file download and printing.
pub trait HostPlatform {
    /// Offers `contents` to the user as a file called `file_name`.
    ///
    /// Returns the written path, or `None` if the user cancelled.
    fn download(&mut self, file_name: &str, contents: &[u8]) -> Result<Option<PathBuf>>;

    /// Asks the host to print the current screen. Fire-and-forget.
    fn print(&mut self);
}

/// Native desktop host: rfd save dialogs and window captures.
pub struct DesktopPlatform {
    default_dir: Option<PathBuf>,
    print_requested: bool,
}

impl DesktopPlatform {
    pub fn new(default_dir: Option<PathBuf>) -> Self {
        Self {
            default_dir,
            print_requested: false,
        }
    }

    /// Takes a pending print request, if any. The app answers it with a window capture.
    pub fn take_print_request(&mut self) -> bool {
        std::mem::take(&mut self.print_requested)
    }
}

impl HostPlatform for DesktopPlatform {
    fn download(&mut self, file_name: &str, contents: &[u8]) -> Result<Option<PathBuf>> {
        let mut dialog = rfd::FileDialog::new().set_file_name(file_name);
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str());
        if let Some(extension) = extension {
            dialog = dialog.add_filter(&extension.to_uppercase(), &[extension]);
        }
        if let Some(dir) = &self.default_dir {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.save_file() else {
            log::info!("Save of {} cancelled", file_name);
            return Ok(None);
        };

        std::fs::write(&path, contents)?;
        log::info!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(Some(path))
    }

    fn print(&mut self) {
        log::info!("Print requested");
        self.print_requested = true;
    }
}

/// Encodes a window capture as PNG bytes.
pub fn encode_png(screenshot: &egui::ColorImage) -> Result<Vec<u8>> {
    let [width, height] = screenshot.size;
    let rgba: Vec<u8> = screenshot.pixels.iter().flat_map(|c| c.to_array()).collect();
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, rgba)
        .ok_or(PlannerError::Screenshot(width, height))?;

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)?;
    Ok(bytes)
}
