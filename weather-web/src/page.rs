use minijinja::{Environment, context};
use weather_core::DisplayView;

const INDEX: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Compiled page templates, shared read-only between requests.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX, INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render the form page, with at most one of the reading or the error filled in.
    pub fn index(&self, view: &DisplayView) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX)?.render(context! {
            weather => view.weather(),
            error => view.error().map(|err| err.message.as_str()),
        })
    }
}
