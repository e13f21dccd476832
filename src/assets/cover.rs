// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use url::Url;

use crate::error::CoverError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};

/// File name of the full-size cover art at the output root
pub const COVER_ART_FILE: &str = "cover_art.jpg";
/// File name of the thumbnail at the output root
pub const SMALL_COVER_ART_FILE: &str = "small_cover_art.jpg";

/// Longest edge the thumbnail may have, in pixels
const THUMBNAIL_BOUND: u32 = 1000;

/// Result of a cover art download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverOutcome {
    Saved { width: u32, height: u32 },
    AlreadyPresent,
}

/// Download the channel cover art and derive its thumbnail.
///
/// Full-size image and thumbnail are treated as one unit: when
/// `cover_art.jpg` already exists, nothing is fetched and the thumbnail is
/// never regenerated on its own. The thumbnail is bounded to 1000×1000,
/// aspect ratio preserved, downscale only.
pub async fn download_cover_art<C: HttpClient>(
    client: &C,
    image_url: &Url,
    output_dir: &Path,
    reporter: &SharedProgressReporter,
) -> Result<CoverOutcome, CoverError> {
    let cover_path = output_dir.join(COVER_ART_FILE);
    let small_path = output_dir.join(SMALL_COVER_ART_FILE);

    if cover_path.exists() {
        reporter.report(ProgressEvent::CoverArtSkipped);
        return Ok(CoverOutcome::AlreadyPresent);
    }

    let url = image_url.as_str();

    let bytes = client
        .get_bytes(url)
        .await
        .map_err(|e| CoverError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    let decoded = image::load_from_memory(&bytes).map_err(|e| CoverError::DecodeFailed {
        url: url.to_string(),
        source: e,
    })?;

    // JPEG has no alpha channel
    let cover = DynamicImage::ImageRgb8(decoded.to_rgb8());

    cover
        .save_with_format(&cover_path, ImageFormat::Jpeg)
        .map_err(|e| CoverError::SaveFailed {
            path: cover_path.clone(),
            source: e,
        })?;

    // Downscale only; an image already within bounds is saved as-is
    let small = if cover.width() > THUMBNAIL_BOUND || cover.height() > THUMBNAIL_BOUND {
        cover.thumbnail(THUMBNAIL_BOUND, THUMBNAIL_BOUND)
    } else {
        cover
    };

    small
        .save_with_format(&small_path, ImageFormat::Jpeg)
        .map_err(|e| CoverError::SaveFailed {
            path: small_path.clone(),
            source: e,
        })?;

    reporter.report(ProgressEvent::CoverArtSaved {
        width: small.width(),
        height: small.height(),
    });

    Ok(CoverOutcome::Saved {
        width: small.width(),
        height: small.height(),
    })
}
