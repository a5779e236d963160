//! PPT Export Module
//! Writes the deck as a PowerPoint file: one slide per deck slide with its
//! title, subtitle, main message, both charts as images and the takeaways.
//!
//! Uses direct ZIP/XML generation; the package holds only the parts
//! PowerPoint needs to open it (one layout, one master, one theme).

use crate::charts::{RenderError, StaticChartRenderer};
use crate::deck::{ChartSpec, Slide};
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use thiserror::Error;
use zip::write::FileOptions;
use zip::ZipWriter;

/// EMU (English Metric Units) conversion: 914400 EMU = 1 inch
const EMU_PER_INCH: i64 = 914400;
/// 16:9 slide dimensions (13.333 x 7.5 inches)
const SLIDE_WIDTH: i64 = 12192000;
const SLIDE_HEIGHT: i64 = 6858000;

/// Document title written to the package properties
pub const DECK_TITLE: &str = "Investor Pitch Deck";

/// Rendered chart image size in pixels (3:2, matches the picture frames)
pub const CHART_IMAGE_WIDTH: u32 = 1200;
pub const CHART_IMAGE_HEIGHT: u32 = 800;

const MARGIN: i64 = EMU_PER_INCH * 2 / 5;
const CHART_WIDTH: i64 = EMU_PER_INCH * 27 / 5; // 5.4 in
const CHART_HEIGHT: i64 = EMU_PER_INCH * 18 / 5; // 3.6 in
const CHART_GAP: i64 = EMU_PER_INCH * 3 / 10;
const CHART_TOP: i64 = EMU_PER_INCH * 21 / 10;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Failed to render chart '{chart}' on slide {slide}: {source}")]
    Render {
        slide: u32,
        chart: String,
        #[source]
        source: RenderError,
    },
    #[error("Expected chart images for {expected} slides, got {actual}")]
    ImageCount { expected: usize, actual: usize },
}

/// Chart images for one slide, PNG encoded.
pub type SlideImages = [Vec<u8>; 2];

/// Text box placement and styling on a slide.
struct TextBox<'a> {
    name: &'a str,
    paragraphs: Vec<String>,
    rect: (i64, i64, i64, i64),
    size: u32,
    bold: bool,
    italic: bool,
    color: &'a str,
}

/// PPT generator for exporting the deck
pub struct PptGenerator;

impl PptGenerator {
    /// Render every chart of the deck and write the PPTX to `output_path`.
    pub fn export_deck(slides: &[Slide], output_path: &Path, title: &str) -> Result<(), ExportError> {
        let images = Self::render_slide_images(slides)?;
        let file = File::create(output_path)?;
        Self::write_pptx(file, slides, &images, title)?;

        log::info!(
            "PPT generated: {} ({} slides, {} images)",
            output_path.display(),
            slides.len(),
            images.len() * 2
        );
        Ok(())
    }

    /// Render both charts of every slide to PNG bytes.
    pub fn render_slide_images(slides: &[Slide]) -> Result<Vec<SlideImages>, ExportError> {
        slides
            .iter()
            .map(|slide| -> Result<SlideImages, ExportError> {
                let render = |spec: &ChartSpec| {
                    StaticChartRenderer::render_png(spec, CHART_IMAGE_WIDTH, CHART_IMAGE_HEIGHT)
                        .map_err(|source| ExportError::Render {
                            slide: slide.id,
                            chart: spec.title.clone(),
                            source,
                        })
                };
                log::debug!("Rendering charts for slide {}", slide.id);
                Ok([render(&slide.chart1)?, render(&slide.chart2)?])
            })
            .collect()
    }

    /// Write the PPTX package. `images[i]` belongs to `slides[i]`.
    pub fn write_pptx<W: Write + Seek>(
        writer: W,
        slides: &[Slide],
        images: &[SlideImages],
        title: &str,
    ) -> Result<W, ExportError> {
        if images.len() != slides.len() {
            return Err(ExportError::ImageCount {
                expected: slides.len(),
                actual: images.len(),
            });
        }

        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default();
        let slide_count = slides.len();

        // 1. [Content_Types].xml
        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(Self::content_types_xml(slide_count).as_bytes())?;

        // 2. _rels/.rels
        zip.start_file("_rels/.rels", options)?;
        zip.write_all(Self::rels_xml().as_bytes())?;

        // 3. ppt/_rels/presentation.xml.rels
        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;
        zip.write_all(Self::presentation_rels_xml(slide_count).as_bytes())?;

        // 4. ppt/presentation.xml
        zip.start_file("ppt/presentation.xml", options)?;
        zip.write_all(Self::presentation_xml(slide_count).as_bytes())?;

        // 5. Slides, their relationships and chart images
        for (idx, (slide, pair)) in slides.iter().zip(images.iter()).enumerate() {
            let slide_num = idx + 1;
            let image_ids = [2 * idx + 1, 2 * idx + 2];

            zip.start_file(
                format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
                options,
            )?;
            zip.write_all(Self::slide_rels_xml(&image_ids).as_bytes())?;

            zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)?;
            zip.write_all(Self::slide_xml(slide).as_bytes())?;

            for (img_id, bytes) in image_ids.iter().zip(pair.iter()) {
                zip.start_file(format!("ppt/media/image{}.png", img_id), options)?;
                zip.write_all(bytes)?;
            }
        }

        // 6. Slide layout
        zip.start_file("ppt/slideLayouts/slideLayout1.xml", options)?;
        zip.write_all(Self::slide_layout_xml().as_bytes())?;
        zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", options)?;
        zip.write_all(Self::layout_rels_xml().as_bytes())?;

        // 7. Slide master
        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;
        zip.write_all(Self::slide_master_xml().as_bytes())?;
        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;
        zip.write_all(Self::master_rels_xml().as_bytes())?;

        // 8. Theme
        zip.start_file("ppt/theme/theme1.xml", options)?;
        zip.write_all(Self::theme_xml().as_bytes())?;

        // 9. docProps
        zip.start_file("docProps/core.xml", options)?;
        zip.write_all(Self::core_props_xml(title).as_bytes())?;
        zip.start_file("docProps/app.xml", options)?;
        zip.write_all(Self::app_props_xml(slide_count).as_bytes())?;

        Ok(zip.finish()?)
    }

    fn content_types_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Default Extension="png" ContentType="image/png"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#.to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                i
            ));
            xml.push('\n');
        }
        xml.push_str("</Types>");
        xml
    }

    fn rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
    }

    fn presentation_rels_xml(slide_count: usize) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#.to_string();

        for i in 1..=slide_count {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 2, i
            ));
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn presentation_xml(slide_count: usize) -> String {
        let slide_ids: String = (1..=slide_count)
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + i, i + 2))
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst>{}</p:sldIdLst>
<p:sldSz cx="{}" cy="{}"/>
<p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            slide_ids, SLIDE_WIDTH, SLIDE_HEIGHT, SLIDE_HEIGHT, SLIDE_WIDTH
        )
    }

    fn slide_rels_xml(image_ids: &[usize]) -> String {
        let mut xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
"#.to_string();

        for (idx, img_id) in image_ids.iter().enumerate() {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image{}.png"/>"#,
                idx + 2, img_id
            ));
            xml.push('\n');
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn slide_xml(slide: &Slide) -> String {
        let content_width = SLIDE_WIDTH - 2 * MARGIN;
        let charts_left = (SLIDE_WIDTH - 2 * CHART_WIDTH - CHART_GAP) / 2;
        let takeaways_top = CHART_TOP + CHART_HEIGHT + EMU_PER_INCH / 10;

        let mut boxes = vec![TextBox {
            name: "Title",
            paragraphs: vec![slide.title.clone()],
            rect: (MARGIN, EMU_PER_INCH * 3 / 10, content_width, EMU_PER_INCH * 7 / 10),
            size: 2800,
            bold: true,
            italic: false,
            color: "059669",
        }];
        if let Some(sub_title) = &slide.sub_title {
            boxes.push(TextBox {
                name: "Subtitle",
                paragraphs: vec![sub_title.clone()],
                rect: (MARGIN, EMU_PER_INCH, content_width, EMU_PER_INCH * 9 / 20),
                size: 1800,
                bold: false,
                italic: false,
                color: "64748B",
            });
        }
        boxes.push(TextBox {
            name: "Main Message",
            paragraphs: vec![format!("\u{201c}{}\u{201d}", slide.main_message)],
            rect: (MARGIN, EMU_PER_INCH * 29 / 20, content_width, EMU_PER_INCH * 3 / 5),
            size: 1500,
            bold: false,
            italic: true,
            color: "334155",
        });
        boxes.push(TextBox {
            name: "Key Takeaways",
            paragraphs: slide
                .key_takeaways
                .iter()
                .map(|point| format!("\u{2022} {}", point))
                .collect(),
            rect: (
                MARGIN,
                takeaways_top,
                content_width,
                SLIDE_HEIGHT - takeaways_top - MARGIN / 2,
            ),
            size: 1200,
            bold: false,
            italic: false,
            color: "334155",
        });

        let mut shapes = String::new();
        let mut shape_id = 2;
        for text_box in &boxes {
            shapes.push_str(&Self::text_box_xml(shape_id, text_box));
            shape_id += 1;
        }

        for idx in 0..2 {
            let x = charts_left + idx as i64 * (CHART_WIDTH + CHART_GAP);
            let r_id = idx + 2;
            shapes.push_str(&format!(
                r#"
<p:pic>
<p:nvPicPr>
<p:cNvPr id="{}" name="Chart {}"/>
<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
<p:nvPr/>
</p:nvPicPr>
<p:blipFill>
<a:blip r:embed="rId{}"/>
<a:stretch><a:fillRect/></a:stretch>
</p:blipFill>
<p:spPr>
<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
</p:spPr>
</p:pic>"#,
                shape_id,
                idx + 1,
                r_id,
                x,
                CHART_TOP,
                CHART_WIDTH,
                CHART_HEIGHT
            ));
            shape_id += 1;
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld>
<p:spTree>
<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
{}
</p:spTree>
</p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            shapes
        )
    }

    fn text_box_xml(shape_id: usize, text_box: &TextBox<'_>) -> String {
        let (x, y, w, h) = text_box.rect;
        let paragraphs: String = text_box
            .paragraphs
            .iter()
            .map(|text| {
                format!(
                    r#"<a:p><a:r><a:rPr lang="en-US" sz="{}" b="{}" i="{}" dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:rPr><a:t>{}</a:t></a:r></a:p>"#,
                    text_box.size,
                    u8::from(text_box.bold),
                    u8::from(text_box.italic),
                    text_box.color,
                    escape_xml(text)
                )
            })
            .collect();

        format!(
            r#"
<p:sp>
<p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
<p:spPr>
<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>
<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
<a:noFill/>
</p:spPr>
<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{}</p:txBody>
</p:sp>"#,
            shape_id, text_box.name, x, y, w, h, paragraphs
        )
    }

    fn slide_layout_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">
<p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#
    }

    fn layout_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#
    }

    fn slide_master_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree></p:cSld>
<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#
    }

    fn master_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#
    }

    fn theme_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Deck Theme">
<a:themeElements>
<a:clrScheme name="Deck"><a:dk1><a:srgbClr val="0F172A"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="334155"/></a:dk2><a:lt2><a:srgbClr val="F1F5F9"/></a:lt2><a:accent1><a:srgbClr val="10B981"/></a:accent1><a:accent2><a:srgbClr val="3B82F6"/></a:accent2><a:accent3><a:srgbClr val="EF4444"/></a:accent3><a:accent4><a:srgbClr val="F59E0B"/></a:accent4><a:accent5><a:srgbClr val="8B5CF6"/></a:accent5><a:accent6><a:srgbClr val="06B6D4"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme>
<a:fontScheme name="Deck"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme>
<a:fmtScheme name="Deck"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme>
</a:themeElements>
<a:objectDefaults/>
<a:extraClrSchemeLst/>
</a:theme>"#
    }

    fn core_props_xml(title: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>{}</dc:title>
<dc:creator>Pitch Deck</dc:creator>
<cp:lastModifiedBy>Pitch Deck</cp:lastModifiedBy>
<cp:revision>1</cp:revision>
</cp:coreProperties>"#,
            escape_xml(title)
        )
    }

    fn app_props_xml(slide_count: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
<TotalTime>0</TotalTime>
<Application>Pitch Deck</Application>
<PresentationFormat>Widescreen</PresentationFormat>
<Slides>{}</Slides>
<Notes>0</Notes>
<HiddenSlides>0</HiddenSlides>
<ScaleCrop>false</ScaleCrop>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>16.0000</AppVersion>
</Properties>"#,
            slide_count
        )
    }
}

/// Escape text for XML element content and attribute values.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
