/// Layout Measurer: slide sizes and gap to absolute track offsets.
pub mod measure;
