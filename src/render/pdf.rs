use super::scan::ScanLibrary;
use crate::error::{AppError, AppResult};
use crate::layout::{Grid, LayoutConfig, Slot};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const PT_PER_INCH: f64 = 72.0;
const CROP_MARK_WIDTH_PT: f64 = 0.5;

fn real(value: f64) -> Object {
    Object::Real(value as _)
}

fn pt(inches: f64) -> f64 {
    inches * PT_PER_INCH
}

/// PDF 排版渲染
///
/// 每页按网格排列卡图，同一张卡图在文档中只嵌入一次。
pub struct PdfRenderer {
    layout: LayoutConfig,
}

impl PdfRenderer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn render<P: AsRef<Path>>(&self, images: &[P]) -> AppResult<Vec<u8>> {
        let grid = Grid::new(self.layout.paper, self.layout.card)?;
        let page_count = grid.page_count(images.len());

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut library = ScanLibrary::new(self.layout.border_crop);
        let mut embedded: HashMap<PathBuf, (String, ObjectId)> = HashMap::new();
        let mut page_ops: Vec<Vec<Operation>> = (0..page_count).map(|_| Vec::new()).collect();
        let mut page_xobjects: Vec<Dictionary> = (0..page_count).map(|_| Dictionary::new()).collect();

        for (index, image) in images.iter().enumerate() {
            let path = image.as_ref();
            let scan = library.load(path)?;

            let (name, id) = match embedded.get(path) {
                Some(entry) => entry.clone(),
                None => {
                    let (width, height) = scan.image.dimensions();
                    let stream = Stream::new(
                        dictionary! {
                            "Type" => "XObject",
                            "Subtype" => "Image",
                            "Width" => i64::from(width),
                            "Height" => i64::from(height),
                            "ColorSpace" => "DeviceRGB",
                            "BitsPerComponent" => 8_i64,
                        },
                        scan.image.as_raw().clone(),
                    );
                    let entry = (format!("Im{}", embedded.len() + 1), doc.add_object(stream));
                    embedded.insert(path.to_path_buf(), entry.clone());
                    entry
                }
            };

            let slot = grid.slot(index);
            page_xobjects[slot.page].set(name.clone(), id);
            self.place_card(
                &mut page_ops[slot.page],
                &grid,
                slot,
                &name,
                scan.inset_x,
                scan.inset_y,
            );
        }

        if self.layout.cropmarks {
            for ops in page_ops.iter_mut() {
                Self::draw_crop_marks(ops, &grid);
            }
        }

        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            real(pt(grid.paper.width)),
            real(pt(grid.paper.height)),
        ];

        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for (operations, xobjects) in page_ops.into_iter().zip(page_xobjects) {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().map_err(AppError::encode_failed)?,
            ));
            let resources_id = doc.add_object(dictionary! {
                "XObject" => Object::Dictionary(xobjects),
            });
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => media_box.clone(),
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(AppError::encode_failed)?;
        Ok(bytes)
    }

    fn place_card(
        &self,
        ops: &mut Vec<Operation>,
        grid: &Grid,
        slot: Slot,
        name: &str,
        inset_x: f64,
        inset_y: f64,
    ) {
        let width = pt(grid.card.width);
        let height = pt(grid.card.height);
        // PDF 原点在左下角
        let x = pt(slot.x);
        let y = pt(grid.paper.height - slot.y - grid.card.height);

        if let Some(color) = self.layout.background {
            let [r, g, b] = color.to_unit_rgb();
            ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
            ops.push(Operation::new(
                "re",
                vec![real(x), real(y), real(width), real(height)],
            ));
            ops.push(Operation::new("f", vec![]));
        }

        let dx = width * inset_x;
        let dy = height * inset_y;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                real(width - 2.0 * dx),
                real(0.0),
                real(0.0),
                real(height - 2.0 * dy),
                real(x + dx),
                real(y + dy),
            ],
        ));
        ops.push(Operation::new(
            "Do",
            vec![Object::Name(name.as_bytes().to_vec())],
        ));
        ops.push(Operation::new("Q", vec![]));
    }

    fn draw_crop_marks(ops: &mut Vec<Operation>, grid: &Grid) {
        let page_height = grid.paper.height;
        ops.push(Operation::new("w", vec![real(CROP_MARK_WIDTH_PT)]));
        ops.push(Operation::new("RG", vec![real(0.0), real(0.0), real(0.0)]));
        for mark in grid.crop_marks() {
            ops.push(Operation::new(
                "m",
                vec![real(pt(mark.x1)), real(pt(page_height - mark.y1))],
            ));
            ops.push(Operation::new(
                "l",
                vec![real(pt(mark.x2)), real(pt(page_height - mark.y2))],
            ));
        }
        ops.push(Operation::new("S", vec![]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_scan(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        RgbImage::from_pixel(50, 70, Rgb([200, 10, 10]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn one_page_per_nine_cards_and_shared_images() {
        let dir = TempDir::new().unwrap();
        let a = write_scan(&dir, "a.png");
        let b = write_scan(&dir, "b.png");
        let images = vec![a.clone(); 9]
            .into_iter()
            .chain(std::iter::once(b))
            .collect::<Vec<_>>();

        let bytes = PdfRenderer::new(LayoutConfig::default())
            .render(&images)
            .unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        let image_count = doc
            .objects
            .values()
            .filter(|obj| {
                obj.as_stream()
                    .ok()
                    .and_then(|s| s.dict.get(b"Subtype").ok())
                    .and_then(|v| v.as_name().ok())
                    == Some(b"Image".as_slice())
            })
            .count();
        assert_eq!(image_count, 2);
    }

    #[test]
    fn empty_sequence_gives_blank_page() {
        let images: Vec<PathBuf> = Vec::new();
        let bytes = PdfRenderer::new(LayoutConfig::default())
            .render(&images)
            .unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
