mod lifecycle;
mod properties;
mod query;
mod records;
