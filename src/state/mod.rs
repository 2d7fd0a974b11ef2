pub mod data_model;
pub mod normalize;
pub mod table_state;
pub mod view;
