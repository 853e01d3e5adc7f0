use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::MovieId,
};

/// Finds the movies most similar to `title`
///
/// Ranks every other catalog entry by its score in the selected movie's
/// similarity row, highest first. Equal scores keep catalog order (the sort
/// is stable), and the selected movie is excluded by position so it never
/// appears in its own results.
///
/// Returns at most `count` identifiers; fewer when the catalog is smaller
/// than `count + 1`.
pub fn recommend(catalog: &Catalog, title: &str, count: usize) -> AppResult<Vec<MovieId>> {
    let selected = catalog
        .position(title)
        .ok_or_else(|| AppError::NotFound(format!("Movie '{}' is not in the catalog", title)))?;

    let row = catalog.similarity_row(selected).ok_or_else(|| {
        AppError::Internal(format!("Missing similarity row for catalog index {}", selected))
    })?;

    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let recommendations = ranked
        .into_iter()
        .filter(|(index, _)| *index != selected)
        .take(count)
        .filter_map(|(index, _)| catalog.entry(index).map(|entry| entry.movie_id))
        .collect::<Vec<_>>();

    tracing::debug!(
        title = %title,
        catalog_index = selected,
        results = recommendations.len(),
        "Similar movies ranked"
    );

    Ok(recommendations)
}
