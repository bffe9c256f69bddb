//! Media definitions of a [`Listing`].

use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Listing;

/// Image attached to a [`Listing`].
///
/// Holds references only: the bytes are durably stored by the object
/// storage before this record is shaped.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Image {
    /// Durable URL of this [`Image`].
    pub url: String,

    /// Storage-assigned identifier of this [`Image`].
    pub public_id: Option<String>,

    /// Human-readable caption of this [`Image`].
    pub caption: Option<String>,
}

/// Form field an [`Upload`] arrived through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UploadField {
    /// Gallery `images` field.
    Images,

    /// Single `coverImg` field.
    Cover,
}

/// Stored upload to be associated with a [`Listing`].
#[derive(Clone, Debug)]
pub struct Upload {
    /// Form field this [`Upload`] arrived through.
    pub field: UploadField,

    /// Durable URL returned by the object storage.
    pub url: String,

    /// Identifier assigned by the object storage, if any.
    pub public_id: Option<String>,

    /// Original filename of the uploaded file.
    pub filename: String,
}

impl Upload {
    /// Shapes this [`Upload`] into an [`Image`] record.
    ///
    /// The caption is the original filename; the storage reference falls
    /// back to the filename with its extension stripped when the backend
    /// assigned none.
    fn into_image(self) -> Image {
        let Self {
            field: _,
            url,
            public_id,
            filename,
        } = self;

        Image {
            url,
            public_id: public_id.or_else(|| Some(stem(&filename).to_owned())),
            caption: Some(filename),
        }
    }
}

/// Associates stored `uploads` with a [`Listing`]: an ordered gallery from
/// the `images` field and at most one cover image, taken from the first
/// `coverImg` file only.
#[must_use]
pub fn associate(uploads: Vec<Upload>) -> (Vec<Image>, Option<Image>) {
    let mut images = Vec::new();
    let mut cover = None;

    for upload in uploads {
        match upload.field {
            UploadField::Images => images.push(upload.into_image()),
            UploadField::Cover => {
                if cover.is_none() {
                    cover = Some(upload.into_image());
                }
            }
        }
    }

    (images, cover)
}

/// Strips the extension off the provided `filename`.
fn stem(filename: &str) -> &str {
    filename.rsplit_once('.').map_or(filename, |(stem, _)| stem)
}

#[cfg(test)]
mod spec {
    use super::{associate, Upload, UploadField};

    fn upload(field: UploadField, name: &str) -> Upload {
        Upload {
            field,
            url: format!("https://img.test/{name}"),
            public_id: None,
            filename: name.to_owned(),
        }
    }

    #[test]
    fn preserves_gallery_order() {
        let (images, cover) = associate(vec![
            upload(UploadField::Images, "front.jpg"),
            upload(UploadField::Images, "kitchen.jpg"),
            upload(UploadField::Images, "garden.jpg"),
        ]);

        assert!(cover.is_none());
        assert_eq!(
            images
                .iter()
                .map(|i| i.caption.as_deref().unwrap())
                .collect::<Vec<_>>(),
            ["front.jpg", "kitchen.jpg", "garden.jpg"],
        );
    }

    #[test]
    fn takes_first_cover_only() {
        let (images, cover) = associate(vec![
            upload(UploadField::Cover, "first.png"),
            upload(UploadField::Cover, "second.png"),
        ]);

        assert!(images.is_empty());
        assert_eq!(cover.unwrap().caption.as_deref(), Some("first.png"));
    }

    #[test]
    fn storage_reference_falls_back_to_filename_stem() {
        let (images, _) =
            associate(vec![upload(UploadField::Images, "pool.house.jpg")]);

        assert_eq!(images[0].public_id.as_deref(), Some("pool.house"));
    }

    #[test]
    fn storage_assigned_reference_wins() {
        let mut u = upload(UploadField::Images, "deck.jpg");
        u.public_id = Some("realtor/houses/abc123".to_owned());

        let (images, _) = associate(vec![u]);
        assert_eq!(
            images[0].public_id.as_deref(),
            Some("realtor/houses/abc123"),
        );
        assert_eq!(images[0].caption.as_deref(), Some("deck.jpg"));
    }
}
