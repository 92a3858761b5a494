pub mod document_ops;
pub mod vector_search;
