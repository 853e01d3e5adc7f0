//! Precomputed recommendation artifacts.
//!
//! The catalog (movie id + title per row) and the similarity matrix are
//! loaded once at startup and shared read-only for the life of the process.
//! Row `i` of the matrix holds the similarity of catalog entry `i` to every
//! other entry.

use std::{collections::HashMap, fs, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::CatalogEntry,
};

/// Square matrix of pairwise similarity scores indexed by catalog position
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Builds a matrix, rejecting ragged rows and negative or non-finite scores
    pub fn new(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let size = rows.len();

        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(AppError::Artifact(format!(
                    "similarity row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            if let Some((j, score)) = row
                .iter()
                .enumerate()
                .find(|(_, score)| !score.is_finite() || **score < 0.0)
            {
                return Err(AppError::Artifact(format!(
                    "similarity ({}, {}) is {}, expected a finite non-negative score",
                    i, j, score
                )));
            }
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn is_symmetric(&self) -> bool {
        self.rows.iter().enumerate().all(|(i, row)| {
            row.iter()
                .enumerate()
                .skip(i + 1)
                .all(|(j, score)| *score == self.rows[j][i])
        })
    }
}

/// Movie catalog paired with its similarity matrix
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    /// Title -> first row carrying that title
    title_index: HashMap<String, usize>,
    similarity: SimilarityMatrix,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>, similarity: SimilarityMatrix) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::Artifact("catalog is empty".to_string()));
        }

        if similarity.len() != entries.len() {
            return Err(AppError::Artifact(format!(
                "similarity matrix is {}x{} but catalog has {} movies",
                similarity.len(),
                similarity.len(),
                entries.len()
            )));
        }

        if !similarity.is_symmetric() {
            tracing::warn!(
                movies = entries.len(),
                "Similarity matrix is not symmetric"
            );
        }

        let mut title_index = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            title_index.entry(entry.title.clone()).or_insert(index);
        }

        if title_index.len() != entries.len() {
            tracing::warn!(
                movies = entries.len(),
                unique_titles = title_index.len(),
                "Catalog contains duplicate titles; lookups use the first match"
            );
        }

        Ok(Self {
            entries,
            title_index,
            similarity,
        })
    }

    /// Loads both artifacts from JSON files
    pub fn load(movies_path: &Path, similarity_path: &Path) -> AppResult<Self> {
        let movies_json = fs::read_to_string(movies_path)?;
        let similarity_json = fs::read_to_string(similarity_path)?;

        let catalog = Self::from_json(&movies_json, &similarity_json)?;

        tracing::info!(
            movies = catalog.len(),
            movies_path = %movies_path.display(),
            similarity_path = %similarity_path.display(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn from_json(movies_json: &str, similarity_json: &str) -> AppResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(movies_json)?;
        let rows: Vec<Vec<f64>> = serde_json::from_str(similarity_json)?;
        Self::new(entries, SimilarityMatrix::new(rows)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Row index of the first entry with exactly this title
    pub fn position(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn similarity_row(&self, index: usize) -> Option<&[f64]> {
        self.similarity.row(index)
    }

    /// Titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.title.as_str())
    }
}
