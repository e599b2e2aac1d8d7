pub mod grid;
pub mod validation;

pub use grid::{
    clamp_column_width, clamp_row_height, validate_page_size, PageOverflow, DEFAULT_PAGE_SIZE,
    DEFAULT_ROW_HEIGHT, MAX_PAGE_SIZE, MIN_COLUMN_WIDTH, MIN_ROW_HEIGHT,
};
pub use validation::{validate_login, validate_registration, LoginForm, RegistrationForm};
