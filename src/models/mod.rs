pub mod api;
pub mod external;
pub mod roi;
