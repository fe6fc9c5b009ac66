//! Minimal PDF assembly for image-only pages.
//!
//! Every page carries exactly one raster image placed in millimetre coordinates
//! measured from the top-left corner of the page. The writer converts those
//! into PDF user space (points, origin bottom-left) when serializing.

use crate::error::{ExportError, Result};
use crate::units::{Mm, Pt};
use chrono::{Datelike, Timelike};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use serde::{Deserialize, Serialize};
use std::io::Write;

const IMAGE_NAME: Name<'static> = Name(b"Im0");

/// How page images are compressed.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossy DCT compression at the pass's JPEG quality.
    #[default]
    Jpeg,
    /// Lossless Flate-compressed RGB.
    Png,
}

/// Compression settings for page images.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Encoding {
    pub format: ImageFormat,
    pub jpeg_quality: u8,
}

/// An image ready to embed as an XObject stream.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    filter: Filter,
}

impl Encoding {
    pub fn encode(&self, image: &RgbImage) -> Result<EncodedImage> {
        let (data, filter) = match self.format {
            ImageFormat::Jpeg => {
                let mut data = Vec::new();
                {
                    let quality = self.jpeg_quality.clamp(1, 100);
                    let mut encoder = JpegEncoder::new_with_quality(&mut data, quality);
                    encoder.encode_image(image)?;
                }
                (data, Filter::DctDecode)
            }
            ImageFormat::Png => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder
                    .write_all(image.as_raw())
                    .map_err(|e| ExportError::Encoding(e.to_string()))?;
                let data = encoder
                    .finish()
                    .map_err(|e| ExportError::Encoding(e.to_string()))?;
                (data, Filter::FlateDecode)
            }
        };

        Ok(EncodedImage {
            data,
            width: image.width(),
            height: image.height(),
            filter,
        })
    }
}

/// Where an image sits on its page, measured from the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    pub x: Mm,
    pub y: Mm,
    pub width: Mm,
    pub height: Mm,
}

#[derive(Debug, Clone)]
pub struct PdfPage {
    pub width: Mm,
    pub height: Mm,
    pub image: EncodedImage,
    pub placement: Placement,
}

/// Document properties shown by PDF viewers.
#[derive(Debug, Clone, Default)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
}

#[derive(Debug, Default)]
pub struct PdfDocument {
    pub pages: Vec<PdfPage>,
    pub info: Info,
}

impl PdfDocument {
    pub fn new(info: Info) -> PdfDocument {
        PdfDocument {
            pages: Vec::new(),
            info,
        }
    }

    pub fn add_page(&mut self, page: PdfPage) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serializes the document.
    pub fn write(&self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(ExportError::Serialization(
                "document has no pages".to_string(),
            ));
        }

        let mut next = Ref::new(1);
        let catalog_id = next.bump();
        let tree_id = next.bump();
        let info_id = next.bump();

        // (page, content stream, image) per page
        let ids: Vec<(Ref, Ref, Ref)> = self
            .pages
            .iter()
            .map(|_| (next.bump(), next.bump(), next.bump()))
            .collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(ids.iter().map(|(page_id, _, _)| *page_id))
            .count(ids.len() as i32);

        for (page, (page_id, content_id, image_id)) in self.pages.iter().zip(ids.iter().copied()) {
            let page_width: Pt = page.width.into();
            let page_height: Pt = page.height.into();

            let mut writer = pdf.page(page_id);
            writer.media_box(Rect::new(0.0, 0.0, page_width.0, page_height.0));
            writer.parent(tree_id);
            writer.contents(content_id);
            writer.resources().x_objects().pair(IMAGE_NAME, image_id);
            writer.finish();

            let mut xobject = pdf.image_xobject(image_id, &page.image.data);
            xobject.filter(page.image.filter);
            xobject.width(page.image.width as i32);
            xobject.height(page.image.height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            xobject.finish();

            let x: Pt = page.placement.x.into();
            let width: Pt = page.placement.width.into();
            let height: Pt = page.placement.height.into();
            let y: Pt = (page.height - page.placement.y - page.placement.height).into();

            let mut content = Content::new();
            content.save_state();
            content.transform([width.0, 0.0, 0.0, height.0, x.0, y.0]);
            content.x_object(IMAGE_NAME);
            content.restore_state();
            pdf.stream(content_id, &content.finish());
        }

        let now = chrono::Local::now();
        let created = Date::new(now.year().clamp(0, 9999) as u16)
            .month(now.month() as u8)
            .day(now.day() as u8)
            .hour(now.hour() as u8)
            .minute(now.minute() as u8)
            .second(now.second() as u8);

        let mut info = pdf.document_info(info_id);
        if let Some(title) = &self.info.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.info.author {
            info.author(TextStr(author));
        }
        if let Some(creator) = &self.info.creator {
            info.creator(TextStr(creator));
        }
        info.creation_date(created);
        info.finish();

        Ok(pdf.finish())
    }
}
