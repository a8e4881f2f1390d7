pub mod app;

pub use app::{
    BASE_URL, bearer_get, get_json_body, json_request, login, make_sql_test_app, make_test_app_with,
    make_test_app,
};
