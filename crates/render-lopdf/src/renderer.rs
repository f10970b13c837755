use crate::helpers::PageContext;
use fieldreport_layout::{FontFace, LaidOutDocument};
use fieldreport_render_core::{DocumentRenderer, RenderError};
use fieldreport_types::{RasterImage, mm_to_pt};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;
use std::io::Write;

/// Writes a [`LaidOutDocument`] as a PDF 1.7 file.
///
/// The output carries no timestamps or file identifiers, so rendering the
/// same document twice yields identical bytes. Page content streams are left
/// uncompressed; images are Flate-compressed with an optional soft mask.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer {
    title: Option<String>,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document information `/Title`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn font_dictionary() -> Dictionary {
        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            fonts.set(
                face.resource_name(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => face.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        fonts
    }

    /// Adds every image as an XObject and returns the resource dictionary
    /// plus the key to resource-name mapping used while drawing.
    fn add_images(
        doc: &mut Document,
        document: &LaidOutDocument,
    ) -> Result<(Dictionary, HashMap<String, String>), RenderError> {
        let mut xobjects = Dictionary::new();
        let mut names = HashMap::new();

        for (index, (key, image)) in document.images.iter().enumerate() {
            image.validate().map_err(|message| RenderError::InvalidImage {
                key: key.clone(),
                message,
            })?;

            let image_id = add_image_xobject(doc, image)?;
            let name = format!("Im{}", index + 1);
            xobjects.set(name.as_str(), image_id);
            names.insert(key.clone(), name);
        }
        Ok((xobjects, names))
    }
}

fn flate_compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn image_stream(width: u32, height: u32, color_space: &str, data: &[u8]) -> Result<Stream, RenderError> {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, flate_compress(data)?))
}

fn add_image_xobject(doc: &mut Document, image: &RasterImage) -> Result<ObjectId, RenderError> {
    let smask_id = match &image.alpha {
        Some(alpha) => Some(doc.add_object(image_stream(
            image.width,
            image.height,
            "DeviceGray",
            alpha,
        )?)),
        None => None,
    };

    let mut stream = image_stream(image.width, image.height, "DeviceRGB", &image.rgb)?;
    if let Some(smask_id) = smask_id {
        stream.dict.set("SMask", smask_id);
    }
    Ok(doc.add_object(stream))
}

impl DocumentRenderer for LopdfRenderer {
    fn render(&self, document: &LaidOutDocument) -> Result<Vec<u8>, RenderError> {
        if document.pages.is_empty() {
            return Err(RenderError::Other("document has no pages".to_string()));
        }

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let (xobjects, image_names) = Self::add_images(&mut doc, document)?;
        let mut resources = dictionary! {
            "Font" => Self::font_dictionary(),
        };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        let resources_id = doc.add_object(resources);

        let page_height = document.page_size.height;
        let mut page_ids: Vec<Object> = Vec::with_capacity(document.pages.len());
        for elements in &document.pages {
            let mut ctx = PageContext::new(page_height, &image_names);
            for el in elements {
                ctx.draw_element(el)?;
            }
            let content_id = doc.add_object(Stream::new(dictionary! {}, ctx.finish().encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_ids.push(page_id.into());
        }

        let page_count = page_ids.len();
        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            mm_to_pt(document.page_size.width).into(),
            mm_to_pt(page_height).into(),
        ];
        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => page_ids,
                "Count" => page_count as i64,
                "MediaBox" => media_box,
                "Resources" => resources_id,
            }
            .into(),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::String(b"fieldreport".to_vec(), StringFormat::Literal),
        };
        if let Some(title) = &self.title {
            info.set(
                "Title",
                Object::String(crate::helpers::to_win_ansi(title), StringFormat::Literal),
            );
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        log::debug!(
            "Rendered {} page(s), {} image(s), {} bytes",
            page_count,
            document.images.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}
