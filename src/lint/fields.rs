//! The fixed tables describing a template bundle's shape.
//!
//! Which manifest fields point at other files, what kind of file each one
//! should be, and which satellite a rule group reads. This is configuration
//! data, not computed state.

use crate::json::Segment;

/// File name of the root manifest inside a template directory.
pub const MANIFEST_FILE_NAME: &str = "template-info.json";

/// Maximum byte size accepted for referenced external CSV files.
pub const MAX_CSV_SIZE: u64 = 10 * 1024 * 1024;

/// Expected kind of a file referenced from the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Json,
    Html,
    Image,
    Csv,
}

impl AssetKind {
    /// Human name used in diagnostic messages.
    pub fn describe(self) -> &'static str {
        match self {
            AssetKind::Json => "JSON file",
            AssetKind::Html => "HTML file",
            AssetKind::Image => "image file",
            AssetKind::Csv => "CSV file",
        }
    }
}

/// Which source file a rule group inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The root manifest.
    TemplateInfo,
    /// The variables definition satellite.
    Variables,
    /// The UI pages satellite.
    Ui,
    /// Rules files (legacy `ruleDefinition` and the `rules` array).
    Rules,
    /// The folder definition satellite.
    Folder,
    /// The auto-install configuration satellite.
    AutoInstall,
    /// The layout definition satellite.
    Layout,
}

impl SourceKind {
    /// All rule groups, in dispatch order.
    pub const ALL: [SourceKind; 7] = [
        SourceKind::TemplateInfo,
        SourceKind::Variables,
        SourceKind::Ui,
        SourceKind::Rules,
        SourceKind::Folder,
        SourceKind::AutoInstall,
        SourceKind::Layout,
    ];
}

/// One manifest field registered as "points at another file".
#[derive(Debug, Clone, Copy)]
pub struct PathField {
    /// Pattern of the field inside the manifest tree.
    pub pattern: &'static [Segment<'static>],
    /// What the referenced file must be.
    pub kind: AssetKind,
}

/// Every manifest field whose string value is a template-relative file path.
pub const PATH_FIELDS: &[PathField] = &[
    PathField {
        pattern: &[Segment::Key("variableDefinition")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[Segment::Key("uiDefinition")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[Segment::Key("layoutDefinition")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[Segment::Key("folderDefinition")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[Segment::Key("autoInstallDefinition")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[Segment::Key("ruleDefinition")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[Segment::Key("rules"), Segment::Any, Segment::Key("file")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("dashboards"),
            Segment::Any,
            Segment::Key("file"),
        ],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[Segment::Key("lenses"), Segment::Any, Segment::Key("file")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("eltDataflows"),
            Segment::Any,
            Segment::Key("file"),
        ],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[Segment::Key("recipes"), Segment::Any, Segment::Key("file")],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("components"),
            Segment::Any,
            Segment::Key("file"),
        ],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("storedQueries"),
            Segment::Any,
            Segment::Key("file"),
        ],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("extendedTypes"),
            Segment::Any,
            Segment::Any,
            Segment::Key("file"),
        ],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("externalFiles"),
            Segment::Any,
            Segment::Key("schema"),
        ],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("externalFiles"),
            Segment::Any,
            Segment::Key("userXmd"),
        ],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("datasetFiles"),
            Segment::Any,
            Segment::Key("userXmd"),
        ],
        kind: AssetKind::Json,
    },
    PathField {
        pattern: &[
            Segment::Key("releaseInfo"),
            Segment::Key("notesFile"),
        ],
        kind: AssetKind::Html,
    },
    PathField {
        pattern: &[
            Segment::Key("imageFiles"),
            Segment::Any,
            Segment::Key("file"),
        ],
        kind: AssetKind::Image,
    },
    PathField {
        pattern: &[
            Segment::Key("externalFiles"),
            Segment::Any,
            Segment::Key("file"),
        ],
        kind: AssetKind::Csv,
    },
];
