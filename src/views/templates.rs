use handlebars::Handlebars;
use std::path::Path;
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

const TEMPLATES: &[&str] = &[
    // Layout + pages
    "layouts/base",
    "pages/home",
    "pages/not_found",
    // Entity views
    "security/list",
    "security/detail",
    "security/update",
    "purchase/list",
    "purchase/detail",
    "purchase/update",
    "entity/delete",
];

const PARTIALS: &[&str] = &["navbar", "footer", "alert"];

pub fn build_handlebars(dir: impl AsRef<Path>) -> Result<Hbs, String> {
    let dir = dir.as_ref();
    let mut hb = Handlebars::new();

    for name in TEMPLATES {
        let file = dir.join(format!("{name}.hbs"));
        hb.register_template_file(name, &file)
            .map_err(|e| format!("template {name}: {e}"))?;
    }

    for name in PARTIALS {
        let file = dir.join("partials").join(format!("{name}.hbs"));
        let source = std::fs::read_to_string(&file)
            .map_err(|e| format!("partials/{name}.hbs: {e}"))?;
        hb.register_partial(name, source)
            .map_err(|e| format!("register {name} partial: {e}"))?;
    }

    Ok(Arc::new(hb))
}
