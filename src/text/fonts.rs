use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::{
    compile::FontWeight,
    foundation::error::{SealError, SealResult},
};

/// Family names tried, in order, when no font file is configured or the configured one fails.
const SYSTEM_CJK_FAMILIES: &[&str] = &[
    "Noto Sans CJK SC",
    "Noto Serif CJK SC",
    "Source Han Sans SC",
    "Source Han Sans CN",
    "WenQuanYi Zen Hei",
    "WenQuanYi Micro Hei",
    "Microsoft YaHei",
    "SimHei",
    "PingFang SC",
    "Heiti SC",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    System(String),
}

/// Raw bytes of one font face plus the family name it reports.
#[derive(Clone)]
pub struct FontFace {
    pub data: Arc<Vec<u8>>,
    /// Face index inside a collection (`.ttc`).
    pub index: u32,
    pub family: String,
    pub source: FontSource,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .field("source", &self.source)
            .finish()
    }
}

impl FontFace {
    /// Parse `bytes` and keep the first face.
    pub fn from_bytes(bytes: Vec<u8>, source: FontSource) -> SealResult<Self> {
        Self::from_collection(bytes, 0, source)
    }

    /// Parse `bytes` and keep face `index` of a collection (`0` for a plain font file).
    pub fn from_collection(bytes: Vec<u8>, index: u32, source: FontSource) -> SealResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        if db.faces().next().is_none() {
            return Err(SealError::font(format!("no font faces in {source:?}")));
        }
        let face = db
            .faces()
            .find(|f| f.index == index)
            .ok_or_else(|| SealError::font(format!("no face {index} in {source:?}")))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| SealError::font(format!("font in {source:?} has no family name")))?;
        Ok(Self {
            data: Arc::new(bytes),
            index,
            family,
            source,
        })
    }

    pub fn from_path(path: &Path) -> SealResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| SealError::font(format!("{e:#}")))?;
        Self::from_bytes(bytes, FontSource::File(path.to_path_buf()))
    }
}

/// Font files requested by the caller. Unset entries go straight to system discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontPaths {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
}

/// The regular and bold faces every render draws with.
///
/// Either slot may be empty when neither the configured file nor any system font could be
/// loaded; text is then skipped and shapes still render.
#[derive(Clone, Debug, Default)]
pub struct FontSet {
    regular: Option<FontFace>,
    bold: Option<FontFace>,
}

impl FontSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_faces(regular: Option<FontFace>, bold: Option<FontFace>) -> Self {
        Self { regular, bold }
    }

    /// Load the configured font files. Failures are logged and recovered by falling back to
    /// system fonts; this never fails.
    #[tracing::instrument(level = "debug")]
    pub fn load(paths: &FontPaths) -> Self {
        let regular = paths
            .regular
            .as_deref()
            .and_then(|p| load_or_warn(p, FontWeight::Regular));
        let bold = paths
            .bold
            .as_deref()
            .and_then(|p| load_or_warn(p, FontWeight::Bold));

        if regular.is_some() && bold.is_some() {
            return Self { regular, bold };
        }

        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        load_fonts_from_dir(&mut db, Path::new("fonts"));

        let regular = regular.or_else(|| system_face(&db, FontWeight::Regular));
        let bold = bold.or_else(|| system_face(&db, FontWeight::Bold));
        if regular.is_none() && bold.is_none() {
            tracing::warn!("no usable font found; seal text will not be drawn");
        }
        Self { regular, bold }
    }

    /// System fonts only.
    pub fn system() -> Self {
        Self::load(&FontPaths::default())
    }

    /// Face for `weight`, falling back to the other weight when only one is available.
    pub fn face(&self, weight: FontWeight) -> Option<&FontFace> {
        match weight {
            FontWeight::Regular => self.regular.as_ref().or(self.bold.as_ref()),
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_none() && self.bold.is_none()
    }
}

fn load_or_warn(path: &Path, weight: FontWeight) -> Option<FontFace> {
    match FontFace::from_path(path) {
        Ok(face) => {
            tracing::debug!(?weight, family = %face.family, "loaded font file");
            Some(face)
        }
        Err(e) => {
            tracing::warn!(?weight, path = %path.display(), error = %e, "font registration failed; using system font");
            None
        }
    }
}

fn system_face(db: &usvg::fontdb::Database, weight: FontWeight) -> Option<FontFace> {
    let mut families: Vec<usvg::fontdb::Family<'_>> = SYSTEM_CJK_FAMILIES
        .iter()
        .map(|&name| usvg::fontdb::Family::Name(name))
        .collect();
    families.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &families,
        weight: match weight {
            FontWeight::Regular => usvg::fontdb::Weight::NORMAL,
            FontWeight::Bold => usvg::fontdb::Weight::BOLD,
        },
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };

    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "unknown".to_string());
    let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    tracing::debug!(?weight, %family, "using system font");
    Some(FontFace {
        data: Arc::new(data),
        index,
        source: FontSource::System(family.clone()),
        family,
    })
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
