use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Local, NaiveDate, TimeZone};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Photo, PhotoSize, ResolvedPhoto};

pub const PHOTO_EXTENSION: &str = "jpg";

/// Random 128-character alphanumeric PKCE code verifier.
pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Picks the variant to download from a photo's size list.
///
/// A zero-area variant is a sentinel: once one is seen the last variant of
/// the list wins no matter what follows. Otherwise the strictly largest
/// area wins and ties keep the earliest variant.
pub fn select_best_size(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
    let last = sizes.last()?;
    let mut best: Option<&PhotoSize> = None;
    let mut max_area = 0;

    for size in sizes {
        let area = size.area();
        if area == 0 {
            return Some(last);
        }
        if area > max_area {
            max_area = area;
            best = Some(size);
        }
    }

    best
}

/// Local calendar date of a unix timestamp.
pub fn capture_date(timestamp: i64) -> Option<NaiveDate> {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.date_naive())
}

/// Reduces a descriptor to its download URL and size class.
///
/// Returns `None` when the photo has no size variants or an unusable
/// timestamp.
pub fn resolve_photo(photo: &Photo) -> Option<ResolvedPhoto> {
    let size = select_best_size(&photo.sizes)?;
    let date = capture_date(photo.date)?;

    Some(ResolvedPhoto {
        id: photo.id,
        likes: photo.likes.count,
        date,
        url: size.url.clone(),
        size_class: size.kind.clone(),
    })
}

pub fn file_name_for(stem: &str) -> String {
    format!("{stem}.{PHOTO_EXTENSION}")
}

/// Chooses the stored file name: like-count first, then capture date, then
/// the photo id, skipping candidates already present in `existing`.
pub fn choose_file_name(
    existing: &HashSet<String>,
    likes: u64,
    date: NaiveDate,
    id: i64,
) -> String {
    let by_likes = file_name_for(&likes.to_string());
    if !existing.contains(&by_likes) {
        return by_likes;
    }

    let by_date = file_name_for(&date.format("%Y-%m-%d").to_string());
    if !existing.contains(&by_date) {
        return by_date;
    }

    file_name_for(&id.to_string())
}

/// Creates the progress bar shown while downloading or uploading a batch.
///
/// # Arguments
///
/// * `len` - Number of items in the batch
/// * `message` - Text printed in front of the bar
///
/// # Returns
///
/// A bar styled as `{msg} {bar:40.blue} {pos}/{len}`. Callers advance it
/// with `inc(1)` per item and clear it with `finish_and_clear()`.
///
/// # Example
///
/// ```
/// let pb = progress_bar(photos.len() as u64, "Downloading wall photos");
/// for photo in photos {
///     // ...
///     pb.inc(1);
/// }
/// pb.finish_and_clear();
/// ```
pub fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{msg} {bar:40.blue} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message(message.to_string());
    pb
}
