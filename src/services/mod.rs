pub mod electricity_rates;
pub mod geocoding_service;
pub mod roi_calculator;
pub mod solar_data_service;
pub mod validator;
