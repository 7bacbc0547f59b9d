pub mod roi_controller;
