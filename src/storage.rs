//! Persistence for the card collection used by the CLI host.
//!
//! The engine modules never perform I/O; this store is the collaborator
//! that owns the authoritative card set as one JSON file on disk.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ReviewCard;

const STORE_VERSION: u32 = 1;

/// On-disk envelope around the card set.
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    cards: Vec<ReviewCard>,
}

/// Handles card-collection persistence.
pub struct CardStore {
    path: PathBuf,
}

impl CardStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory: {:?}", parent))?;
        }
        Ok(Self { path })
    }

    /// Get default storage location.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("srs")
            .join("cards.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection from disk. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<ReviewCard>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read card store: {:?}", self.path))?;
        let file: StoreFile = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse card store: {:?}", self.path))?;

        if file.version != STORE_VERSION {
            warn!(
                "card store {:?} has version {}, expected {}",
                self.path, file.version, STORE_VERSION
            );
        }

        Ok(file.cards)
    }

    /// Save the collection to disk.
    pub fn save(&self, cards: &[ReviewCard]) -> Result<()> {
        let file = StoreFile {
            version: STORE_VERSION,
            cards: cards.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write card store: {:?}", self.path))?;
        Ok(())
    }
}
