mod form_token;

pub use form_token::require_form_token;
