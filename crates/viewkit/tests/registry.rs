use std::sync::Arc;
use std::thread;

use regex::Regex;
use serde::Serialize;
use viewkit::{
    FunctionSet, MemoryFs, RegistryError, RenderError, RequestContext, TemplateRegistry,
};

fn views() -> MemoryFs {
    MemoryFs::from_entries(&[
        (
            "layout.html",
            r#"{% include "header.html" %} layout {% block content %}{% endblock %} {{ get_time() }} {% include "footer.html" %}"#,
        ),
        (
            "layout2.html",
            "layout {% block content %}{% endblock %} {{ get_time() }} ",
        ),
        (
            "layout3.html",
            "layout {% block content %}{% endblock %} {{ get_time2() }} ",
        ),
        ("includes/header.html", "header"),
        ("includes/footer.html", "footer"),
        ("pages/index.html", "{% block content %}index{% endblock %}"),
        ("pages2/index2.html", "{% block content %}index{% endblock %}"),
        ("fragments/data.html", "data"),
    ])
}

fn render(registry: &TemplateRegistry, name: &str) -> Result<String, RenderError> {
    let ctx = RequestContext::new("test", "GET", "/");
    let mut out = Vec::new();
    registry.render(&mut out, name, &(), &ctx)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn add_renders_fragment_verbatim() {
    let mut registry = TemplateRegistry::new();
    registry.add(&views(), &["fragments/*.html"]).unwrap();

    assert_eq!(render(&registry, "data.html").unwrap(), "data");
}

#[test]
fn add_keeps_final_newline() {
    let fs = MemoryFs::new().with_file("fragments/data.html", "data\n");
    let mut registry = TemplateRegistry::new();
    registry.add(&fs, &["fragments/*.html"]).unwrap();

    assert_eq!(render(&registry, "data.html").unwrap(), "data\n");
}

#[test]
fn add_with_layout() {
    let mut registry = TemplateRegistry::new();
    registry
        .add_with_layout(&views(), "layout2.html", &["pages/*.html"])
        .unwrap();

    let output = render(&registry, "index.html").unwrap();
    let re = Regex::new(r"^layout index \d{2}:\d{2}:\d{2} $").unwrap();
    assert!(re.is_match(&output), "unexpected output: {output:?}");
}

#[test]
fn add_with_layout_and_includes() {
    let mut registry = TemplateRegistry::new();
    registry
        .add_with_layout_and_includes(&views(), "layout.html", "includes/*.html", &["pages/*.html"])
        .unwrap();

    let output = render(&registry, "index.html").unwrap();
    let re = Regex::new(r"^header layout index \d{2}:\d{2}:\d{2} footer$").unwrap();
    assert!(re.is_match(&output), "unexpected output: {output:?}");
}

#[test]
fn layout_without_functions_is_literal() {
    let fs = MemoryFs::new()
        .with_file("layout.html", r#"{% include "header.html" %} {% block fill %}{% endblock %} {% include "footer.html" %}"#)
        .with_file("includes/header.html", "header")
        .with_file("includes/footer.html", "footer")
        .with_file("pages/index.html", "{% block fill %}index{% endblock %}");

    let mut registry = TemplateRegistry::with_functions(FunctionSet::new());
    registry
        .add_with_layout_and_includes(&fs, "layout.html", "includes/*.html", &["pages/*.html"])
        .unwrap();

    assert_eq!(render(&registry, "index.html").unwrap(), "header index footer");
}

#[test]
fn custom_functions_with_layout() {
    let functions = FunctionSet::new().add("get_time2", || {
        chrono::Local::now().format("%H:%M:%S").to_string()
    });

    let mut registry = TemplateRegistry::with_functions(functions);
    registry
        .add_with_layout(&views(), "layout3.html", &["pages2/*.html"])
        .unwrap();

    let output = render(&registry, "index2.html").unwrap();
    let re = Regex::new(r"^layout index \d{2}:\d{2}:\d{2} $").unwrap();
    assert!(re.is_match(&output), "unexpected output: {output:?}");
}

#[test]
fn custom_functions_replace_defaults() {
    let mut registry = TemplateRegistry::with_functions(FunctionSet::new().add("noop", || ""));

    // layout2.html calls get_time(), which is not in the custom set.
    registry
        .add_with_layout(&views(), "layout2.html", &["pages/*.html"])
        .unwrap();

    let err = render(&registry, "index.html").unwrap_err();
    assert!(matches!(err, RenderError::Execution { ref name, .. } if name == "index.html"));
}

#[test]
fn unknown_name_is_not_found_and_writes_nothing() {
    let mut registry = TemplateRegistry::new();
    registry.add(&views(), &["fragments/*.html"]).unwrap();

    let mut out = Vec::new();
    let err = registry
        .render(&mut out, "missing.html", &(), &())
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(out.is_empty());
}

#[test]
fn reregistering_overwrites() {
    let mut registry = TemplateRegistry::new();
    registry
        .add(&MemoryFs::new().with_file("a/page.html", "first"), &["a/*.html"])
        .unwrap();
    registry
        .add(&MemoryFs::new().with_file("b/page.html", "second"), &["b/*.html"])
        .unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(render(&registry, "page.html").unwrap(), "second");
}

#[test]
fn unmatched_pattern_keeps_earlier_units() {
    let mut registry = TemplateRegistry::new();
    let err = registry
        .add(&views(), &["fragments/*.html", "nothing/*.html", "includes/*.html"])
        .unwrap_err();

    match err {
        RegistryError::NoMatches { pattern } => assert_eq!(pattern, "nothing/*.html"),
        other => panic!("expected NoMatches, got {other:?}"),
    }

    // The first pattern's units survive; the third pattern never ran.
    assert_eq!(registry.names(), vec!["data.html"]);
}

#[test]
fn compile_error_names_file() {
    let fs = views().with_file("fragments/broken.html", "{% if %}");
    let mut registry = TemplateRegistry::new();

    let err = registry.add(&fs, &["fragments/*.html"]).unwrap_err();
    assert!(err.to_string().contains("fragments/broken.html"));
    match err {
        RegistryError::Compile { file, .. } => assert_eq!(file, "fragments/broken.html"),
        other => panic!("expected Compile, got {other:?}"),
    }
}

#[test]
fn execution_error_reports_name_and_layout() {
    let fs = MemoryFs::new()
        .with_file("layout.html", "<title>{{ title }}</title>{% block content %}{% endblock %}")
        .with_file("pages/index.html", "{% block content %}{{ body.text }}{% endblock %}");

    let mut registry = TemplateRegistry::new();
    registry
        .add_with_layout(&fs, "layout.html", &["pages/*.html"])
        .unwrap();

    #[derive(Serialize)]
    struct OnlyTitle {
        title: &'static str,
    }

    let err = registry
        .render(Vec::new(), "index.html", &OnlyTitle { title: "Home" }, &())
        .unwrap_err();

    match err {
        RenderError::Execution { name, layout, .. } => {
            assert_eq!(name, "index.html");
            assert_eq!(layout.as_deref(), Some("layout.html"));
        }
        other => panic!("expected Execution, got {other:?}"),
    }
}

#[test]
fn data_is_html_escaped() {
    let fs = MemoryFs::new().with_file("fragments/greet.html", "<p>{{ name }}</p>");
    let mut registry = TemplateRegistry::new();
    registry.add(&fs, &["fragments/*.html"]).unwrap();

    let data = serde_json::json!({ "name": "<script>" });
    let output = registry.render_to_string("greet.html", &data, &()).unwrap();
    assert_eq!(output, "<p>&lt;script&gt;</p>");
}

#[test]
fn concurrent_renders_are_deterministic() {
    let fs = MemoryFs::new()
        .with_file("layout.html", "<ul>{% block items %}{% endblock %}</ul>")
        .with_file(
            "pages/list.html",
            "{% block items %}{% for i in items %}<li>{{ i }}</li>{% endfor %}{% endblock %}",
        );

    let mut registry = TemplateRegistry::new();
    registry
        .add_with_layout(&fs, "layout.html", &["pages/*.html"])
        .unwrap();
    let registry = Arc::new(registry);

    let data = serde_json::json!({ "items": [1, 2, 3] });
    let expected = registry.render_to_string("list.html", &data, &()).unwrap();
    assert_eq!(expected, "<ul><li>1</li><li>2</li><li>3</li></ul>");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let data = data.clone();
            thread::spawn(move || {
                let ctx = RequestContext::new(format!("req-{i}"), "GET", "/list");
                (0..50)
                    .map(|_| registry.render_to_string("list.html", &data, &ctx).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for output in handle.join().unwrap() {
            assert_eq!(output, expected);
        }
    }
}
