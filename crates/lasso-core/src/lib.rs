pub mod barcode;
pub mod mapper;
pub mod route;
pub mod selection;
pub mod words;
