//! Parser for the flat-file store.
//!
//! This module handles parsing the two `.dat` files a [`crate::FileStore`] reads:
//! - movies.dat: movieId::title::genres::keywords::popularityScore
//! - activity.dat: userId::movieId::rating::liked
//!
//! `genres` and `keywords` are comma-separated label lists. `rating` is left
//! empty when the user only liked the movie; `liked` is `0` or `1`.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;

/// Read a data file into lines, mapping a missing file to `FileNotFound`.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Pull the next `::`-separated field or report which one is missing.
fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    file: &str,
    line: usize,
    name: &str,
) -> Result<&'a str> {
    parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Missing {}", name),
    })
}

/// Parse the movies.dat file
///
/// Rows come back in file order; that order is the catalog's natural order.
pub fn parse_movies(path: &Path) -> Result<Vec<CatalogItem>> {
    const FILE: &str = "movies.dat";
    let lines = read_lines(path)?;
    let mut movies = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }

        let mut parts = line_trimmed.split("::");
        let movie_id = next_field(&mut parts, FILE, line_no, "movieId")?;
        let title = next_field(&mut parts, FILE, line_no, "title")?;
        let genres = next_field(&mut parts, FILE, line_no, "genres")?;
        let keywords = next_field(&mut parts, FILE, line_no, "keywords")?;
        let popularity = next_field(&mut parts, FILE, line_no, "popularityScore")?;

        let movie_id: MovieId = movie_id.trim().parse().map_err(|e| DataLoadError::ParseError {
            file: FILE.to_string(),
            line: line_no,
            reason: format!("Invalid movieId: {}", e),
        })?;
        let popularity_score = parse_popularity(popularity).map_err(|reason| {
            DataLoadError::ParseError {
                file: FILE.to_string(),
                line: line_no,
                reason,
            }
        })?;

        movies.push(CatalogItem::from_raw(
            movie_id,
            title.trim(),
            genres,
            keywords,
            popularity_score,
        ));
    }
    Ok(movies)
}

/// Parse the activity.dat file
pub fn parse_activity(path: &Path) -> Result<Vec<ActivityRecord>> {
    const FILE: &str = "activity.dat";
    let lines = read_lines(path)?;
    let mut records = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let mut parts = line_trimmed.split("::");
        let user_id = next_field(&mut parts, FILE, line_no, "userId")?;
        let movie_id = next_field(&mut parts, FILE, line_no, "movieId")?;
        let rating = next_field(&mut parts, FILE, line_no, "rating")?;
        let liked = next_field(&mut parts, FILE, line_no, "liked")?;

        let record = ActivityRecord {
            user_id: user_id.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: FILE.to_string(),
                line: line_no,
                reason: format!("Invalid userId: {}", e),
            })?,
            movie_id: movie_id.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: FILE.to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            rating: parse_rating(rating).map_err(|reason| DataLoadError::ParseError {
                file: FILE.to_string(),
                line: line_no,
                reason,
            })?,
            liked: parse_liked(liked)?,
        };

        records.push(record);
    }
    Ok(records)
}

/// Empty (or `NULL`) means the user never rated the movie.
fn parse_rating(s: &str) -> std::result::Result<Option<f32>, String> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    let value: f32 = s.parse().map_err(|e| format!("Invalid rating: {}", e))?;
    if !value.is_finite() {
        return Err(format!("Invalid rating: {}", s));
    }
    Ok(Some(value))
}

fn parse_liked(s: &str) -> Result<bool> {
    match s.trim() {
        "1" => Ok(true),
        "0" | "" => Ok(false),
        other => Err(DataLoadError::InvalidValue {
            field: "liked".to_string(),
            value: other.to_string(),
        }),
    }
}

fn parse_popularity(s: &str) -> std::result::Result<f32, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let value: f32 = s
        .parse()
        .map_err(|e| format!("Invalid popularityScore: {}", e))?;
    if !value.is_finite() {
        return Err(format!("Invalid popularityScore: {}", s));
    }
    Ok(value)
}
