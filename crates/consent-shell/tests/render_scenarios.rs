//! End-to-end rendering checks against parsed HTML output.

use consent_shell::{
    render, BodyNode, ConfigError, Fragment, LoadTiming, PageConfig, ScriptRef, WidgetRef,
};
use scraper::{Html, Selector};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn parse(config: PageConfig, children: &str) -> Html {
    let doc = render(config, Fragment::raw(children)).unwrap();
    Html::parse_document(&doc.to_html())
}

fn select<'a>(html: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    html.select(&selector).collect()
}

#[test]
fn test_minimal_document() {
    let html = parse(PageConfig::new("benchmark"), "<span>hi</span>");

    assert!(select(&html, "head script").is_empty());
    let body = select(&html, "body");
    assert_eq!(body[0].inner_html(), "<span>hi</span>");
    assert_eq!(select(&html, "title")[0].inner_html(), "benchmark");
}

#[test]
fn test_async_script_attribute_set() {
    let config = PageConfig::new("benchmark").script(
        ScriptRef::url("https://vendor.example/a.js")
            .timing(LoadTiming::Async)
            .attr("data-id", "X"),
    );
    let html = parse(config, "");

    let scripts = select(&html, "head script");
    assert_eq!(scripts.len(), 1);
    let script = scripts[0].value();
    let mut names: Vec<_> = script.attrs().map(|(name, _)| name).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["async", "data-id", "src"]);
    assert_eq!(script.attr("src"), Some("https://vendor.example/a.js"));
    assert_eq!(script.attr("data-id"), Some("X"));
}

#[test]
fn test_head_script_order() {
    let config = PageConfig::new("benchmark")
        .script(ScriptRef::url("https://vendor.example/A.js"))
        .script(ScriptRef::url("https://vendor.example/B.js"));
    let html = parse(config, "");

    let srcs: Vec<_> = select(&html, "head script")
        .iter()
        .filter_map(|s| s.value().attr("src"))
        .collect();
    assert_eq!(
        srcs,
        vec!["https://vendor.example/A.js", "https://vendor.example/B.js"]
    );
}

#[test]
fn test_callbacks_not_invoked_by_render() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let config = PageConfig::new("benchmark").widget(
        WidgetRef::new("didomi-sdk")
            .prop("apiKey", "k")
            .on("onReady", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
    );

    let doc = render(config, Fragment::empty()).unwrap();
    let _ = doc.to_html();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let widget = doc.widget("didomi-sdk").unwrap();
    assert!(widget.fire("onReady", &json!({ "consent": true })));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!widget.fire("onDismiss", &json!(null)));
}

#[test]
fn test_counts_and_order_across_shapes() {
    for script_count in 0..4 {
        for widget_count in 0..3 {
            let mut config = PageConfig::new("benchmark");
            for i in 0..script_count {
                config = config.script(if i % 2 == 0 {
                    ScriptRef::url(format!("https://vendor.example/{i}.js"))
                } else {
                    ScriptRef::inline(format!("window.s{i} = {i};"))
                        .attr("id", format!("s{i}"))
                });
            }
            for i in 0..widget_count {
                config = config.widget(WidgetRef::new(format!("widget-{i}")));
            }

            let html = parse(config, "<main id=\"content\">page</main>");

            let scripts = select(&html, "head script");
            assert_eq!(scripts.len(), script_count);
            for (i, script) in scripts.iter().enumerate() {
                if i % 2 == 0 {
                    let expected = format!("https://vendor.example/{i}.js");
                    assert_eq!(script.value().attr("src"), Some(expected.as_str()));
                } else {
                    assert_eq!(script.inner_html(), format!("window.s{i} = {i};"));
                }
            }

            let body: Vec<_> = select(&html, "body > *");
            assert_eq!(body.len(), widget_count + 1);
            for (i, element) in body.iter().take(widget_count).enumerate() {
                let kind = format!("widget-{i}");
                assert_eq!(
                    element.value().attr("data-consent-widget"),
                    Some(kind.as_str())
                );
            }
            assert_eq!(body[widget_count].value().attr("id"), Some("content"));
        }
    }
}

#[test]
fn test_attribute_values_survive_serialization() {
    let tricky = r#"{"a":"<b> & \"c\""}"#;
    let config = PageConfig::new("A & B <benchmark>").script(
        ScriptRef::url("https://vendor.example/a.js?x=1&y=2").attr("data-config", tricky),
    );
    let html = parse(config, "");

    let script = select(&html, "head script")[0].value();
    assert_eq!(script.attr("data-config"), Some(tricky));
    assert_eq!(
        script.attr("src"),
        Some("https://vendor.example/a.js?x=1&y=2")
    );
    let title = select(&html, "title")[0].text().collect::<String>();
    assert_eq!(title, "A & B <benchmark>");
}

#[test]
fn test_widget_props_are_json() {
    let config = PageConfig::new("benchmark").widget(
        WidgetRef::new("dgp-cookie-consent")
            .prop("position", "bottom")
            .prop("categories", json!(["necessary", "marketing"])),
    );
    let html = parse(config, "");

    let widget = select(&html, "body > div")[0].value();
    let props: serde_json::Value =
        serde_json::from_str(widget.attr("data-props").unwrap()).unwrap();
    assert_eq!(props["position"], "bottom");
    assert_eq!(props["categories"][1], "marketing");
}

#[test]
fn test_locale_sets_lang() {
    let html = parse(PageConfig::new("benchmark").locale("fr"), "");
    assert_eq!(select(&html, "html")[0].value().attr("lang"), Some("fr"));
}

#[test]
fn test_empty_title_fails_without_output() {
    let result = render(
        PageConfig::new("").widget(WidgetRef::new("w")),
        Fragment::raw("<p>never rendered</p>"),
    );
    assert_eq!(result.unwrap_err(), ConfigError::EmptyTitle);
}

#[test]
fn test_children_passed_through_unmodified() {
    let children = "<div class=\"x\"><!-- keep --><p>a &amp; b</p></div>";
    let doc = render(PageConfig::new("benchmark"), Fragment::raw(children)).unwrap();

    assert!(matches!(
        doc.body(),
        [BodyNode::Children(fragment)] if fragment.as_str() == children
    ));
    assert!(doc.to_html().contains(children));
}
