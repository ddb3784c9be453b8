//! Font discovery and the single slot font cache
//!
//! Fonts live in one directory as `<index>_<name>.bin`. The directory is
//! scanned once, on first use. Only the most recently requested font is kept
//! parsed; asking for another index replaces it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ssd1306::error::OledError;
use crate::ssd1306::font::GlyphTable;

const FONT_SUFFIX: &str = ".bin";

/// Fonts available in a directory
#[derive(Debug)]
pub struct FontCatalog {
    dir: PathBuf,
    names: BTreeMap<usize, String>,
    discovered: bool,
    cache: Option<(usize, GlyphTable)>,
}

/// Split `<index>_<name>` into its parts
fn parse_file_stem(stem: &str) -> Option<(usize, &str)> {
    let (index, name) = stem.split_once('_')?;
    let index = index.parse().ok()?;
    Some((index, name))
}

impl FontCatalog {
    /// Catalog over `dir`; nothing is read until the first query
    pub fn new(dir: impl AsRef<Path>) -> Self {
        FontCatalog {
            dir: dir.as_ref().to_path_buf(),
            names: BTreeMap::new(),
            discovered: false,
            cache: None,
        }
    }

    /// Directory the fonts are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the font directory. Runs once; later calls do nothing.
    ///
    /// A missing or unreadable directory leaves the catalog empty. File names
    /// that do not follow `<index>_<name>.bin` are logged and skipped.
    pub fn discover(&mut self) {
        if self.discovered {
            return;
        }
        self.discovered = true;

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Font directory {} not readable: {}", self.dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(stem) = file_name.strip_suffix(FONT_SUFFIX) else {
                continue;
            };

            match parse_file_stem(stem) {
                Some((index, name)) => {
                    if let Some(previous) = self.names.insert(index, name.to_string()) {
                        log::warn!(
                            "Font index {} used twice, {} replaces {}",
                            index,
                            name,
                            previous
                        );
                    }
                }
                None => log::warn!("Invalid font file name: {}", file_name),
            }
        }

        if self.names.is_empty() {
            log::warn!("No fonts found in {}", self.dir.display());
        } else {
            log::info!("Found {} fonts in {}", self.names.len(), self.dir.display());
        }
    }

    /// Number of discovered fonts; zero means no text can be drawn
    pub fn count(&mut self) -> usize {
        self.discover();
        self.names.len()
    }

    /// Font names by index
    pub fn names(&mut self) -> &BTreeMap<usize, String> {
        self.discover();
        &self.names
    }

    /// Parsed font for `index`, loading it if it is not the cached one.
    ///
    /// A font that fails to parse is not cached, the previous one stays.
    pub fn get(&mut self, index: usize) -> Result<&GlyphTable, OledError> {
        self.discover();

        let hit = matches!(&self.cache, Some((cached, _)) if *cached == index);
        if !hit {
            let name = self.names.get(&index).ok_or(OledError::IndexOutOfRange {
                index,
                len: self.names.len(),
            })?;
            let path = self.dir.join(format!("{}_{}{}", index, name, FONT_SUFFIX));
            let table = GlyphTable::load(&path)?;
            log::info!(
                "Loaded font {} ({}x{}) from {}",
                name,
                table.width(),
                table.height(),
                path.display()
            );
            self.cache = Some((index, table));
        }

        self.cache
            .as_ref()
            .map(|(_, table)| table)
            .ok_or(OledError::IndexOutOfRange {
                index,
                len: self.names.len(),
            })
    }

    /// The cached font, if one is loaded
    pub fn current(&self) -> Option<&GlyphTable> {
        self.cache.as_ref().map(|(_, table)| table)
    }

    /// Index of the cached font
    pub fn cached_index(&self) -> Option<usize> {
        self.cache.as_ref().map(|(index, _)| *index)
    }
}
