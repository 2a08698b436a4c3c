//! Offer extraction from realistic results pages

use partdesk::config::Marketplace;
use partdesk::extract::{extract_offers, normalize_offer_url};

// ============================================================================
// Sample HTML
// ============================================================================

const RESULTS_HTML: &str = r#"
<!DOCTYPE html>
<html lang="pl">
<head>
    <title>Alternator - Części samochodowe - Sprzedajemy.pl</title>
    <link rel="canonical" href="https://oscar.sprzedajemy.pl/szukaj?inp_text%5Bv%5D=alternator">
</head>
<body>
    <header>
        <a href="https://sprzedajemy.pl/">Strona główna</a>
        <a href="https://sprzedajemy.pl/konto">Twoje konto</a>
    </header>
    <ul class="list">
        <li class="element">
            <a class="offerLink" href="https://sprzedajemy.pl/alternator-bosch-passat-b5-nr881001">
                <img src="https://thumbs.sprzedajemy.pl/200x150/alternator.jpg" alt="">
            </a>
            <h2><a href="https://sprzedajemy.pl/alternator-bosch-passat-b5-nr881001">Alternator Bosch Passat B5</a></h2>
            <span class="price">250 zł</span>
        </li>
        <li class="element">
            <a href="https://sprzedajemy.plhttps://sprzedajemy.pl/alternator-bosch-golf-iv-nr881002?utm=lista">Alternator Golf IV</a>
        </li>
        <li class="element">
            <a href="https:/sprzedajemy.pl/alternator-audi-a4-nr881003">Alternator Audi A4</a>
        </li>
        <li class="element">
            <a href="https//sprzedajemy.pl/alternator-skoda-octavia-nr881004">Alternator Octavia</a>
        </li>
        <li class="element">
            <a href="httpshttps://sprzedajemy.pl/alternator-seat-leon-nr881005">Alternator Leon</a>
        </li>
        <li class="element">
            <a href="/alternator-vw-polo-nr881006">Alternator Polo</a>
        </li>
        <li class="promoted">
            <a href="https://allegro.pl/oferta/alternator-nr999">Promowane na innym serwisie</a>
        </li>
    </ul>
    <footer>
        <a href="https://sprzedajemy.pl/pomoc">Pomoc</a>
        <a href="https://sprzedajemy.pl/regulamin">Regulamin</a>
    </footer>
</body>
</html>
"#;

const EMPTY_RESULTS_HTML: &str = r#"
<html><body>
    <ul class="list"></ul>
    <h3>Brak ogłoszeń spełniających kryteria wyszukiwania.</h3>
    <a href="https://sprzedajemy.pl/motoryzacja">Motoryzacja</a>
</body></html>
"#;

#[test]
fn extracts_offers_from_results_page() {
    let result = extract_offers(RESULTS_HTML, &Marketplace::default());

    let ids: Vec<&str> = result.ids().collect();
    assert_eq!(ids, vec!["881001", "881001", "881002", "881003", "881004", "881005", "881006"]);

    let urls: Vec<&str> = result.urls().collect();
    assert_eq!(urls.len(), ids.len());
    assert_eq!(urls[0], "https://sprzedajemy.pl/alternator-bosch-passat-b5-nr881001");
    assert_eq!(
        urls[2],
        "https://sprzedajemy.pl/alternator-bosch-golf-iv-nr881002?utm=lista"
    );
    assert_eq!(urls[3], "https://sprzedajemy.pl/alternator-audi-a4-nr881003");
    assert_eq!(urls[4], "https://sprzedajemy.pl/alternator-skoda-octavia-nr881004");
    assert_eq!(urls[5], "https://sprzedajemy.pl/alternator-seat-leon-nr881005");
    assert_eq!(urls[6], "https://sprzedajemy.pl/alternator-vw-polo-nr881006");
}

#[test]
fn page_without_offers_is_empty() {
    let result = extract_offers(EMPTY_RESULTS_HTML, &Marketplace::default());
    assert!(result.is_empty());
    assert_eq!(result.ids().count(), 0);
    assert_eq!(result.urls().count(), 0);
}

#[test]
fn garbage_input_is_empty() {
    for html in ["", "   ", "<<<>>>", "<a href='/lampa-nr", "\u{0}\u{1}binary"] {
        assert!(extract_offers(html, &Marketplace::default()).is_empty(), "{:?}", html);
    }
}

#[test]
fn extracted_urls_are_already_normalized() {
    let market = Marketplace::default();
    for url in extract_offers(RESULTS_HTML, &market).urls() {
        assert_eq!(normalize_offer_url(url, &market.origin), url);
    }
}

#[test]
fn other_marketplace_configuration() {
    let market = Marketplace {
        name: "Example".into(),
        origin: "https://parts.example.com".into(),
        domain_token: "parts.example.com".into(),
        offer_marker: "/item/".into(),
        id_prefix: "i".into(),
        search_template: "https://parts.example.com/search?q={term}".into(),
        category: String::new(),
        id_mode_flag: "&by=id".into(),
    };
    let html = r#"
        <a href="/item/brake-disc-i4410">Disc</a>
        <a href="https://parts.example.com/item/brake-pads-i4411?ref=home">Pads</a>
        <a href="https://allegro.pl/item/x-i1">Not ours</a>
    "#;

    let result = extract_offers(html, &market);
    assert_eq!(result.ids().collect::<Vec<_>>(), vec!["4410", "4411"]);
    assert_eq!(result.urls().next(), Some("https://parts.example.com/item/brake-disc-i4410"));
}
