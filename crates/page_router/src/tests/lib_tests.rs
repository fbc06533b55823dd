use serde_json::json;

use super::*;

fn standard() -> RouteTable {
    RouteTable::standard().expect("standard table")
}

#[test]
fn root_redirects_to_operator_listing() {
    let table = standard();

    let root = table.resolve("/").expect("root");
    let listing = table.resolve("/operadoras").expect("listing");

    assert_eq!(root.page, Page::OperatorList);
    assert_eq!(root.page, listing.page);
    assert_eq!(root.path, "/operadoras");
    assert_eq!(root.redirected_from.as_deref(), Some("/"));
    assert_eq!(listing.redirected_from, None);
    assert!(listing.params.is_empty());
}

#[test]
fn detail_route_forwards_cnpj_as_typed_prop() {
    let resolved = standard().resolve("/operadoras/999").expect("detail");

    assert_eq!(
        resolved.page,
        Page::OperatorDetail(OperatorDetailProps {
            cnpj: Cnpj::from("999"),
        })
    );
    assert_eq!(resolved.matched.as_deref(), Some(OPERATOR_DETAIL_ROUTE));
    assert_eq!(resolved.params.get("cnpj"), Some("999"));
}

#[test]
fn unmatched_paths_render_not_found() {
    let table = standard();
    for path in ["/estatisticas", "/operadoras/1/despesas", "/operadoras//"] {
        let resolved = table.resolve(path).expect("resolve");
        assert!(
            matches!(resolved.page, Page::NotFound { .. }),
            "{path} resolved to {:?}",
            resolved.page
        );
        assert_eq!(resolved.matched, None);
    }
}

#[test]
fn query_fragment_and_trailing_slash_are_ignored() {
    let table = standard();
    let resolved = table.resolve("/operadoras/?page=2#top").expect("listing");
    assert_eq!(resolved.page, Page::OperatorList);
    assert_eq!(resolved.path, "/operadoras");

    let detail = table.resolve("operadoras/123?tab=despesas").expect("detail");
    assert_eq!(detail.path, "/operadoras/123");
    assert_eq!(detail.params.get("cnpj"), Some("123"));
}

#[test]
fn normalize_path_handles_edge_cases() {
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("?x=1"), "/");
    assert_eq!(normalize_path("/a/"), "/a");
}

#[test]
fn detail_page_without_forwarded_props_is_rejected() {
    let err = RouteTable::new(vec![
        RouteDef::page(OPERATOR_DETAIL_ROUTE, PageKind::OperatorDetail).expect("route"),
    ])
    .expect_err("must reject");
    assert_eq!(
        err,
        RouteError::PropsNotForwarded {
            pattern: OPERATOR_DETAIL_ROUTE.to_string(),
            page: PageKind::OperatorDetail,
        }
    );
}

#[test]
fn detail_page_without_cnpj_param_is_rejected() {
    let err = RouteTable::new(vec![RouteDef::page("/operadoras/:id", PageKind::OperatorDetail)
        .expect("route")
        .with_props()])
    .expect_err("must reject");
    assert_eq!(
        err,
        RouteError::MissingParam {
            pattern: "/operadoras/:id".to_string(),
            param: "cnpj",
            page: PageKind::OperatorDetail,
        }
    );
}

#[test]
fn relative_redirect_targets_are_rejected() {
    assert_eq!(
        RouteDef::redirect("/", "operadoras"),
        Err(RouteError::InvalidRedirect {
            target: "operadoras".to_string(),
        })
    );
}

#[test]
fn redirect_cycles_are_detected() {
    let table = RouteTable::new(vec![
        RouteDef::redirect("/a", "/b").expect("route"),
        RouteDef::redirect("/b", "/a").expect("route"),
    ])
    .expect("table");
    assert_eq!(
        table.resolve("/a"),
        Err(RouteError::RedirectLoop {
            path: "/a".to_string(),
        })
    );
}

#[test]
fn first_matching_route_wins() {
    let table = RouteTable::new(vec![
        RouteDef::page("/operadoras/novas", PageKind::OperatorList).expect("route"),
        RouteDef::page(OPERATOR_DETAIL_ROUTE, PageKind::OperatorDetail)
            .expect("route")
            .with_props(),
    ])
    .expect("table");
    assert_eq!(
        table.resolve("/operadoras/novas").expect("resolve").page,
        Page::OperatorList
    );
}

#[test]
fn resolved_page_serializes_with_its_props() {
    let resolved = standard().resolve("/operadoras/42").expect("detail");
    assert_eq!(
        serde_json::to_value(&resolved.page).expect("encode"),
        json!({"page": "operator_detail", "cnpj": "42"})
    );
}

#[test]
fn navigator_tracks_history() {
    let mut navigator = Navigator::new(standard());
    assert!(navigator.current().is_none());

    let first = navigator.push("/").expect("push root");
    assert_eq!(first.path, "/operadoras");

    navigator.push("/operadoras").expect("push duplicate");
    assert_eq!(navigator.depth(), 1);

    navigator.push("/operadoras/1").expect("push detail");
    navigator.replace("/operadoras/2").expect("replace detail");
    assert_eq!(navigator.depth(), 2);
    assert_eq!(
        navigator.current().map(|route| route.page.clone()),
        Some(Page::OperatorDetail(OperatorDetailProps {
            cnpj: Cnpj::from("2"),
        }))
    );

    let back = navigator.back().expect("back");
    assert_eq!(back.page, Page::OperatorList);
    assert_eq!(navigator.back().map(|route| route.path.as_str()), Some("/operadoras"));
    assert_eq!(navigator.depth(), 1);
}
