use consent_shell::{render_page, Fragment, PageWeight, Vendor, VendorAccount, VendorPage};
use scraper::{Html, Selector};

fn account() -> VendorAccount {
    VendorAccount {
        site_id: "site-42".to_string(),
        policy_id: Some("notice-7".to_string()),
        language: Some("de".to_string()),
    }
}

#[test]
fn test_every_vendor_renders() {
    let scripts = Selector::parse("head script").unwrap();
    let widgets = Selector::parse("body > div[data-consent-widget]").unwrap();
    let title = Selector::parse("title").unwrap();

    for vendor in Vendor::ALL {
        let page = VendorPage::new(vendor, account());
        let doc = render_page(&page, Fragment::raw("<h1>Benchmark</h1>")).unwrap();
        let html = Html::parse_document(&doc.to_html());

        assert_eq!(
            html.select(&scripts).count(),
            doc.head_scripts().len(),
            "{vendor}"
        );
        assert_eq!(html.select(&widgets).count(), doc.widgets().count(), "{vendor}");
        let rendered_title: String = html.select(&title).next().unwrap().text().collect();
        assert_eq!(rendered_title, format!("{} benchmark", vendor.display_name()));
        assert_eq!(doc.locale(), Some("de"));
    }
}

#[test]
fn test_cookieyes_script_markup() {
    let page = VendorPage::new(Vendor::CookieYes, account());
    let html = render_page(&page, Fragment::empty()).unwrap().to_html();
    assert!(html.contains(
        r#"<script src="https://cdn-cookieyes.com/client_data/site-42/script.js" id="cookieyes" type="text/javascript"></script>"#
    ));
}

#[test]
fn test_didomi_sdk_is_a_body_widget() {
    let page = VendorPage::new(Vendor::DidomiSdk, account());
    let doc = render_page(&page, Fragment::empty()).unwrap();

    assert!(doc.head_scripts().is_empty());
    let widget = doc.widget("didomi-sdk").unwrap();
    assert_eq!(widget.props()["noticeId"], "notice-7");
    let events: Vec<_> = widget.events().collect();
    assert_eq!(events, vec!["onConsentChanged", "onReady"]);
}

#[test]
fn test_weights_differ_by_vendor() {
    let weigh = |vendor| {
        let page = VendorPage::new(vendor, account());
        PageWeight::measure(&render_page(&page, Fragment::empty()).unwrap())
    };

    let iubenda = weigh(Vendor::Iubenda);
    assert_eq!(iubenda.external_scripts, 2);
    assert_eq!(iubenda.inline_scripts, 1);
    assert_eq!(
        iubenda.script_hosts,
        vec!["cdn.iubenda.com".to_string(), "cs.iubenda.com".to_string()]
    );

    let dgp = weigh(Vendor::Dgp);
    assert_eq!(dgp.external_scripts, 0);
    assert_eq!(dgp.widgets, 1);
}
