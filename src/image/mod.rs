pub mod f32;
pub mod io;
pub mod rgb;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::rgb::ImageRgbF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageRgbU8;
