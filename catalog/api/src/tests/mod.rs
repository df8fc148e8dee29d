mod api;
mod postgres;
mod service;
mod validation;
