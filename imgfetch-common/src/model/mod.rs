// imgfetch-common/src/model/mod.rs
pub mod decoded_image;

pub use decoded_image::{DecodedImage, ImageSummary};
