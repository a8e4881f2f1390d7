mod admin;
mod health_test;
