//! Cardsmith composes social-media cards from a photo and a few lines of marked-up text.
//!
//! A template such as `%%%Headline%%%\n%%bold%% and %italic% text` is parsed into styled runs,
//! wrapped into line boxes across several fonts, and painted over layered template images:
//!
//! - Open a [`CardStudio`] from a [`StudioConfig`] (fonts are loaded once)
//! - Build a [`CardRequest`] directly, or collect one over several chat turns with a
//!   [`ConversationDraft`]
//! - Call [`CardStudio::generate`] to get a [`RenderedCard`] holding PNG bytes
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod card;
mod foundation;
mod layout;
mod markup;
mod pipeline;
mod render;
mod text;

pub use crate::foundation::core::{Canvas, Point, Rgba8};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::markup::parser::{
    LogicalLine, StyleLevel, TextRun, parse_line, parse_template, split_lines,
};

pub use crate::layout::linebox::{
    BlockLayout, LayoutCursor, PlacedSegment, TextAlign, TextBlock, VisualLine, layout_block,
    layout_line, layout_run,
};
pub use crate::layout::measure::{LineHeights, TextMeasure};

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::fonts::{FontBook, LoadedFont};
pub use crate::assets::store::{AssetLoader, normalize_rel_path};

pub use crate::card::request::{
    CAPTION_HELP, CardRequest, CardVariant, ConversationDraft, DraftStep, MARKUP_EXAMPLE,
    MARKUP_HELP, RenderedCard, TITLE_EXAMPLE,
};
pub use crate::card::spec::{
    CaptionSpec, GradientCardSpec, LogoPlacement, StudioConfig, StyleFont, StyleTable,
    TitleCardSpec, TypeFace,
};

pub use crate::text::shaper::{ShapedText, TextShaper};

pub use crate::render::canvas::{CardCanvas, FrameRGBA};
pub use crate::render::crop::{CropRect, cover_crop, cover_crop_px, crop_to_cover, resize_exact};
pub use crate::render::encode::{encode_png, next_card_path, write_png_atomic};

pub use crate::pipeline::studio::CardStudio;
pub use crate::pipeline::title::paragraph_colors;
