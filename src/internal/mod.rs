pub mod article;
pub mod codec;
pub mod entrance;
pub mod manifest;
pub mod mime;
pub mod virtual_file;
