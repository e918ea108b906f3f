/// Name given to templates created from an id that is not in the catalog.
pub const UNKNOWN_IMPLANT: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplantKind {
    Plate,
    Screw,
    Nail,
    Wire,
}

impl ImplantKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Plate => "plate",
            Self::Screw => "screw",
            Self::Nail => "nail",
            Self::Wire => "wire",
        }
    }

    /// Infers the kind from a template's display name.
    ///
    /// Templates only carry their name, so drawing goes through this rather
    /// than a catalog lookup. Names that match nothing (such as "Unknown")
    /// have no shape.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.contains("Plate") {
            Some(Self::Plate)
        } else if name.contains("Screw") {
            Some(Self::Screw)
        } else if name.contains("Nail") {
            Some(Self::Nail)
        } else if name.contains("Wire") {
            Some(Self::Wire)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ImplantKind,
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { id: "plate-1", name: "Locking Plate 4.5mm", kind: ImplantKind::Plate },
    CatalogEntry { id: "plate-2", name: "Reconstruction Plate 3.5mm", kind: ImplantKind::Plate },
    CatalogEntry { id: "screw-1", name: "Cortical Screw 4.5mm", kind: ImplantKind::Screw },
    CatalogEntry { id: "screw-2", name: "Cancellous Screw 6.5mm", kind: ImplantKind::Screw },
    CatalogEntry { id: "nail-1", name: "Intramedullary Nail", kind: ImplantKind::Nail },
    CatalogEntry { id: "wire-1", name: "K-Wire 2.0mm", kind: ImplantKind::Wire },
];

pub fn lookup(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}
