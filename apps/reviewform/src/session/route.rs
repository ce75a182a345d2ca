use std::fmt;

/// Client-side destinations the session can send the user to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    NotFound,
    Company(String),
    ReviewForm(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::NotFound => "/404".to_string(),
            Route::Company(name) => format!("/company/{name}"),
            Route::ReviewForm(name) => format!("/company/{name}/review"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
