pub mod cursor;
pub mod decide;
pub mod info;
