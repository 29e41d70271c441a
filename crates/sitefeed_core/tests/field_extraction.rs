use pretty_assertions::assert_eq;
use scraper::{ElementRef, Html};
use sitefeed_core::{extract, select_items, ExtractedEntry, FieldExtractor, FieldMap};

const BASE: &str = "https://s.test/list";

fn with_item<R>(html: &str, f: impl FnOnce(ElementRef<'_>) -> R) -> R {
    let doc = Html::parse_document(html);
    let items = select_items(&doc, ".item").expect("valid selector");
    f(items[0])
}

fn fields() -> FieldMap {
    FieldMap {
        title: Some("h2".into()),
        subtitle: Some(".sub".into()),
        description: Some("p".into()),
        link: Some("a.more".into()),
        picture: Some("img.cover".into()),
        ..FieldMap::default()
    }
}

#[test]
fn all_fields_extracted_from_a_complete_item() {
    let html = r#"
        <div class="item">
            <h2>  First
                post </h2>
            <span class="sub">Part one</span>
            <p>Body &amp; more</p>
            <a class="more" href="/posts/1">read</a>
            <img class="cover" src="img/1.jpg">
        </div>"#;
    let entry = with_item(html, |node| extract(node, &fields(), BASE, None));
    assert_eq!(
        entry,
        ExtractedEntry {
            title: "First post".into(),
            subtitle: "Part one".into(),
            description: "Body &amp; more".into(),
            link: "https://s.test/posts/1".into(),
            picture: "https://s.test/img/1.jpg".into(),
        }
    );
}

#[test]
fn missing_sub_elements_degrade_to_empty() {
    let html = r#"<div class="item"><span>nothing useful</span></div>"#;
    let entry = with_item(html, |node| extract(node, &fields(), BASE, None));
    assert_eq!(entry, ExtractedEntry::default());
}

#[test]
fn literal_prefixes_apply_even_without_a_match() {
    let mut map = fields();
    map.subtitle_is = Some("Episode: ".into());
    map.description_is = Some("<b>New</b> ".into());
    let html = r#"<div class="item"><h2>T</h2><p>text</p></div>"#;
    let entry = with_item(html, |node| extract(node, &map, BASE, None));
    assert_eq!(entry.subtitle, "Episode: ");
    assert_eq!(entry.description, "<b>New</b> text");
}

#[test]
fn link_falls_back_to_first_anchor() {
    let html = r#"<div class="item"><h2>T</h2><a href="/first">1</a><a href="/second">2</a></div>"#;
    let entry = with_item(html, |node| extract(node, &fields(), BASE, None));
    assert_eq!(entry.link, "https://s.test/first");
}

#[test]
fn link_selector_without_href_falls_back() {
    let html = r#"<div class="item"><span class="more">x</span><a href="/anchor">a</a></div>"#;
    let mut map = fields();
    map.link = Some(".more".into());
    let entry = with_item(html, |node| extract(node, &map, BASE, None));
    assert_eq!(entry.link, "https://s.test/anchor");
}

#[test]
fn javascript_link_is_empty() {
    let html = r#"<div class="item"><a class="more" href="javascript:void(0)">x</a></div>"#;
    let entry = with_item(html, |node| extract(node, &fields(), BASE, None));
    assert_eq!(entry.link, "");
}

#[test]
fn link_prefix_is_used_for_links_and_pictures() {
    let html = r#"<div class="item"><a class="more" href="p/7">x</a><img class="cover" src="i/7.png"></div>"#;
    let entry = with_item(html, |node| {
        extract(node, &fields(), BASE, Some("https://cdn.other.test/root/"))
    });
    assert_eq!(entry.link, "https://cdn.other.test/root/p/7");
    assert_eq!(entry.picture, "https://cdn.other.test/root/i/7.png");
}

#[test]
fn picture_falls_back_to_first_img() {
    let html = r#"<div class="item"><img data-original="/o.jpg"><img src="/second.jpg"></div>"#;
    let entry = with_item(html, |node| extract(node, &fields(), BASE, None));
    assert_eq!(entry.picture, "https://s.test/o.jpg");
}

#[test]
fn picture_from_srcset_when_no_src() {
    let html = r#"<div class="item"><img class="cover" srcset="a.jpg 1x, b.jpg 2x"></div>"#;
    let entry = with_item(html, |node| extract(node, &fields(), "https://s.test", None));
    assert_eq!(entry.picture, "https://s.test/a.jpg");

    let entry = with_item(html, |node| {
        extract(node, &fields(), "https://s.test", Some("https://img.test/"))
    });
    assert_eq!(entry.picture, "https://img.test/a.jpg");
}

#[test]
fn picture_ignores_the_item_link_as_base() {
    let html = r#"<div class="item"><a class="more" href="https://elsewhere.test/deep/post">x</a><img class="cover" src="pic.jpg"></div>"#;
    let entry = with_item(html, |node| extract(node, &fields(), BASE, None));
    assert_eq!(entry.link, "https://elsewhere.test/deep/post");
    assert_eq!(entry.picture, "https://s.test/pic.jpg");
}

#[test]
fn invalid_sub_selector_only_empties_its_field() {
    let mut map = fields();
    map.subtitle = Some("span[".into());
    let html = r#"<div class="item"><h2>Kept</h2><span class="sub">lost</span><a class="more" href="/k">k</a></div>"#;
    let doc = Html::parse_document(html);
    let extractor = FieldExtractor::new(&map, BASE, None);
    assert_eq!(extractor.errors().len(), 1);

    let node = select_items(&doc, ".item").unwrap()[0];
    let entry = extractor.extract(node);
    assert_eq!(entry.title, "Kept");
    assert_eq!(entry.subtitle, "");
    assert_eq!(entry.link, "https://s.test/k");
}

#[test]
fn extraction_is_deterministic() {
    let html = r#"<div class="item"><h2>Same</h2><a href="/s">s</a><img src="s.png"></div>"#;
    let doc = Html::parse_document(html);
    let extractor = FieldExtractor::new(&fields(), BASE, None);
    let node = select_items(&doc, ".item").unwrap()[0];
    assert_eq!(extractor.extract(node), extractor.extract(node));
}

#[test]
fn description_text_is_escaped_but_quotes_are_kept() {
    let html = r#"<div class="item"><h2>T</h2><p>1 &lt; 2 &amp; "quoted"</p></div>"#;
    let entry = with_item(html, |node| extract(node, &fields(), BASE, None));
    assert_eq!(entry.description, r#"1 &lt; 2 &amp; "quoted""#);
}
