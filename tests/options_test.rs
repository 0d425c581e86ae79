use crawlopts::{
    ArgumentMap, CookieRecord, HeaderMap, Options, SameSite, parse_custom_headers,
    parse_headless_optional_arguments, parse_load_cookies_browser, segment,
};

fn headers_from(input: &str) -> HeaderMap {
    let options = Options {
        custom_headers: segment(&[input], ',').map(str::to_string).collect(),
        ..Default::default()
    };
    options.parse_custom_headers()
}

fn arguments_from(input: &str) -> ArgumentMap {
    let options = Options {
        headless_optional_arguments: segment(&[input], ',').map(str::to_string).collect(),
        ..Default::default()
    };
    options.parse_headless_optional_arguments()
}

fn cookies_from(input: &str) -> Vec<CookieRecord> {
    let options = Options {
        load_cookies_browser: segment(&[input], '\n').map(str::to_string).collect(),
        ..Default::default()
    };
    options.parse_load_cookies_browser()
}

fn cookie(name: &str, value: &str, domain: &str) -> CookieRecord {
    CookieRecord {
        domain: domain.to_string(),
        ..CookieRecord::new(name, value)
    }
}

#[test]
fn test_parse_custom_headers() {
    let cases: [(&str, &[(&str, &str)]); 4] = [
        ("a:b", &[("a", "b")]),
        ("", &[]),
        ("a:", &[("a", "")]),
        ("a:b,c:d", &[("a", "b"), ("c", "d")]),
    ];

    for (input, want) in cases {
        let want: HeaderMap = want.iter().copied().collect();
        assert_eq!(headers_from(input), want, "input {input:?}");
    }
}

#[test]
fn test_parse_headless_optional_arguments() {
    let dashed: &[(&str, &str)] = &[("--a", "a/b,c/d--z--n--m/a"), ("--c", "k"), ("--h", "")];
    let cases: [(&str, &[(&str, &str)]); 9] = [
        ("a=b", &[("a", "b")]),
        ("", &[]),
        ("=b", &[]),
        ("a=", &[]),
        ("a=b,c=d", &[("a", "b"), ("c", "d")]),
        ("a=b,a=b", &[("a", "b")]),
        ("--a=a/b,c/d--z--n--m/a,--c=k,--h", dashed),
        ("--h,--a=a/b,c/d--z--n--m/a,--c=k", dashed),
        ("--a=a/b,c/d--z--n--m/a,--h,--c=k", dashed),
    ];

    for (input, want) in cases {
        let got = arguments_from(input);
        assert_eq!(got.len(), want.len(), "input {input:?}");
        for (key, value) in want {
            assert_eq!(
                got.get(key).map(String::as_str),
                Some(*value),
                "input {input:?}, key {key:?}"
            );
        }
    }
}

#[test]
fn test_load_cookies_browser_domain() {
    let got = cookies_from("foo=bar; Domain=example.com\nbar=foo; Domain=bar.example.com");
    assert_eq!(
        got,
        vec![
            cookie("foo", "bar", "example.com"),
            cookie("bar", "foo", "bar.example.com"),
        ]
    );
}

#[test]
fn test_load_cookies_browser_expires() {
    let got = cookies_from(
        "foo=bar; Domain=example.com; Expires=Wed, 21 Oct 2015 07:28:00 GMT\nbar=foo; Domain=bar.example.com; Expires=Wed, 21 Oct 2015 07:28:00 GMT",
    );
    assert_eq!(
        got,
        vec![
            CookieRecord {
                expires: 1445412480,
                ..cookie("foo", "bar", "example.com")
            },
            CookieRecord {
                expires: 1445412480,
                ..cookie("bar", "foo", "bar.example.com")
            },
        ]
    );
}

#[test]
fn test_load_cookies_browser_path_secure_http_only() {
    let got = cookies_from(
        "foo=bar; Domain=example.com; Expires=Thu, 20 Jun 2024 14:46:26 GMT; Path=/; Secure; HttpOnly\nbar=foo; Domain=bar.example.com; Expires=Thu, 20 Jun 2024 14:46:26 GMT; Path=/",
    );
    assert_eq!(
        got,
        vec![
            CookieRecord {
                expires: 1718894786,
                path: "/".to_string(),
                secure: true,
                http_only: true,
                ..cookie("foo", "bar", "example.com")
            },
            CookieRecord {
                expires: 1718894786,
                path: "/".to_string(),
                ..cookie("bar", "foo", "bar.example.com")
            },
        ]
    );
}

#[test]
fn test_load_cookies_browser_same_site() {
    let line = "foo=bar; Domain=example.com; Expires=Thu, 20 Jun 2024 14:46:26 GMT; Path=/; Secure; HttpOnly; SameSite=";
    let input = ["None", "Strict", "Lax"]
        .iter()
        .map(|policy| format!("{line}{policy}"))
        .collect::<Vec<_>>()
        .join("\n");

    let base = CookieRecord {
        expires: 1718894786,
        path: "/".to_string(),
        secure: true,
        http_only: true,
        ..cookie("foo", "bar", "example.com")
    };
    let want: Vec<CookieRecord> = [SameSite::None, SameSite::Strict, SameSite::Lax]
        .into_iter()
        .map(|same_site| CookieRecord {
            same_site,
            ..base.clone()
        })
        .collect();

    assert_eq!(cookies_from(&input), want);
}

#[test]
fn test_repeated_cookie_lines_are_not_merged() {
    let got = cookies_from("a=1; Domain=x.org\na=2; Domain=x.org");
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].value, "1");
    assert_eq!(got[1].value, "2");
}

#[test]
fn test_canonical_form_round_trips() {
    let headers = parse_custom_headers(["Accept:text/html", "X-Empty:"]);
    assert_eq!(headers_from(&headers.to_string()), headers);

    let arguments = parse_headless_optional_arguments([
        "--h",
        "--proxy-bypass-list=a.com",
        "b.com",
        "--window-size=1280",
        "720",
    ]);
    assert_eq!(arguments_from(&arguments.to_string()), arguments);

    let cookies = parse_load_cookies_browser([
        "foo=bar; Domain=example.com; Expires=Thu, 20 Jun 2024 14:46:26 GMT; Path=/; Secure; SameSite=None",
        "plain=1",
    ]);
    let serialized: Vec<String> = cookies.iter().map(ToString::to_string).collect();
    assert_eq!(cookies_from(&serialized.join("\n")), cookies);
}
