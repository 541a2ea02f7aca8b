use pathtrie::{Method, Methods, Tree};

macro_rules! match_tests {
    ($($name:ident {
        routes = $routes:expr,
        $( $path:literal :: $route:literal =>
            $( $(@$none:tt)? None )?
            $( $(@$some:tt)? { $( $key:literal => $val:literal ),* $(,)? } )?
        ),* $(,)?
    }),* $(,)?) => { $(
        #[test]
        fn $name() {
            let mut tree = Tree::new();

            for route in $routes {
                tree.insert(Method::Get, route, route.to_owned()).unwrap();
            }

            let matcher = tree.compile().unwrap();

            $(match matcher.at(Method::Get, $path) {
                None => {
                    $($( @$some )?
                        panic!("Expected value for route '{}'", $path)
                    )?
                }
                Some(result) => {
                    $($( @$some )?
                        if result.value != $route {
                            panic!(
                                "Wrong value for route '{}'. Expected '{}', found '{}')",
                                $path, $route, result.value
                            );
                        }

                        let expected_params: Vec<(&str, &str)> = vec![$(($key, $val)),*];
                        let got_params = result.params().collect::<Vec<_>>();

                        assert_eq!(
                            got_params, expected_params,
                            "Wrong params for route '{}'",
                            $path
                        );

                        let expected_vars: Vec<&str> = vec![$($val),*];
                        assert_eq!(result.vars.to_vec(), expected_vars);
                    )?

                    $($( @$none )?
                        panic!(
                            "Unexpected value for route '{}', got: {:?}",
                            $path,
                            result.params().collect::<Vec<_>>()
                        );
                    )?
                }
            })*
        }
   )* };
}

match_tests! {
    basic {
        routes = [
            "/hi",
            "/contact",
            "/co",
            "/c",
            "/a",
            "/ab",
            "/doc/",
            "/doc/rust_faq.html",
            "/doc/rust1.26.html",
            "/ʯ",
            "/β",
        ],
        "/a"       :: "/a"       => {},
        "/"        :: ""         => None,
        "/hi"      :: "/hi"      => {},
        "/contact" :: "/contact" => {},
        "/co"      :: "/co"      => {},
        "/con"     :: ""         => None,
        "/cona"    :: ""         => None,
        "/no"      :: ""         => None,
        "/ab"      :: "/ab"      => {},
        "/doc"     :: ""         => None,
        "/doc/"    :: "/doc/"    => {},
        "/ʯ"       :: "/ʯ"       => {},
        "/β"       :: "/β"       => {},
        "hi"       :: ""         => None,
        ""         :: ""         => None,
    },
    wildcard {
        routes = [
            "/",
            "/cmd/{tool}/",
            "/cmd/{tool}/{sub}",
            "/cmd/whoami",
            "/cmd/whoami/root",
            "/cmd/whoami/root/",
            "/search/",
            "/search/{query}",
            "/search/actix-web",
            "/search/google",
            "/doc/",
            "/doc/rust_faq.html",
            "/info/{user}/public",
            "/info/{user}/project/{project}",
            "/info/{user}/project/rustlang",
            "/{cc}",
            "/c1/{dd}/e",
            "/c1/{dd}/e1",
            "/{cc}/cc",
            "/{cc}/{dd}/ee",
            "/{cc}/{dd}/{ee}/ff",
            "/get/test/abc/",
            "/get/{param}/abc/",
            "/get/abc",
            "/get/{param}",
            "/get/abc/123abc",
            "/get/abc/{param}",
            "/get/abc/{param}/test",
        ],
        "/"                              :: "/"                              => {},
        "//"                             :: ""                               => None,
        "/cmd/test"                      :: ""                               => None,
        "/cmd/test/"                     :: "/cmd/{tool}/"                   => { "tool" => "test" },
        "/cmd/test/3"                    :: "/cmd/{tool}/{sub}"              => { "tool" => "test", "sub" => "3" },
        "/cmd/who"                       :: ""                               => None,
        "/cmd/who/"                      :: "/cmd/{tool}/"                   => { "tool" => "who" },
        "/cmd/whoami"                    :: "/cmd/whoami"                    => {},
        "/cmd/whoami/"                   :: "/cmd/{tool}/"                   => { "tool" => "whoami" },
        "/cmd/whoami/r"                  :: "/cmd/{tool}/{sub}"              => { "tool" => "whoami", "sub" => "r" },
        "/cmd/whoami/r/"                 :: ""                               => None,
        "/cmd/whoami/root"               :: "/cmd/whoami/root"               => {},
        "/cmd/whoami/root/"              :: "/cmd/whoami/root/"              => {},
        "/cmd//"                         :: ""                               => None,
        "/search/"                       :: "/search/"                       => {},
        "/search/actix"                  :: "/search/{query}"                => { "query" => "actix" },
        "/search/actix-web"              :: "/search/actix-web"              => {},
        "/search/someth!ng+in+ünìcodé"   :: "/search/{query}"                => { "query" => "someth!ng+in+ünìcodé" },
        "/search/someth!ng+in+ünìcodé/"  :: ""                               => None,
        "/doc"                           :: "/{cc}"                          => { "cc" => "doc" },
        "/doc/rust_faq.html"             :: "/doc/rust_faq.html"             => {},
        "/info/gordon/public"            :: "/info/{user}/public"            => { "user" => "gordon" },
        "/info/gordon/project/rust"      :: "/info/{user}/project/{project}" => { "user" => "gordon", "project" => "rust" },
        "/info/gordon/project/rustlang"  :: "/info/{user}/project/rustlang"  => { "user" => "gordon" },
        "/a"                             :: "/{cc}"                          => { "cc" => "a" },
        "/all"                           :: "/{cc}"                          => { "cc" => "all" },
        "/aaa/cc"                        :: "/{cc}/cc"                       => { "cc" => "aaa" },
        "/all/cc"                        :: "/{cc}/cc"                       => { "cc" => "all" },
        "/c1/d/e"                        :: "/c1/{dd}/e"                     => { "dd" => "d" },
        "/c1/d/e1"                       :: "/c1/{dd}/e1"                    => { "dd" => "d" },
        "/c1/d/ee"                       :: "/{cc}/{dd}/ee"                  => { "cc" => "c1", "dd" => "d" },
        "/cc/cc"                         :: "/{cc}/cc"                       => { "cc" => "cc" },
        "/c/d/ee"                        :: "/{cc}/{dd}/ee"                  => { "cc" => "c", "dd" => "d" },
        "/c/d/e/ff"                      :: "/{cc}/{dd}/{ee}/ff"             => { "cc" => "c", "dd" => "d", "ee" => "e" },
        "/get/test/abc/"                 :: "/get/test/abc/"                 => {},
        "/get/te/abc/"                   :: "/get/{param}/abc/"              => { "param" => "te" },
        "/get/test/abc"                  :: ""                               => None,
        "/get/abc"                       :: "/get/abc"                       => {},
        "/get/a"                         :: "/get/{param}"                   => { "param" => "a" },
        "/get/abcd"                      :: "/get/{param}"                   => { "param" => "abcd" },
        "/get/abc/123abc"                :: "/get/abc/123abc"                => {},
        "/get/abc/12"                    :: "/get/abc/{param}"               => { "param" => "12" },
        "/get/abc/12/test"               :: "/get/abc/{param}/test"          => { "param" => "12" },
        "/get/abc/123abc/test"           :: "/get/abc/{param}/test"          => { "param" => "123abc" },
    },
    literal_priority {
        routes = [
            "/foo/bar",
            "/foo/{id}",
            "/path/{id}",
            "/path/{id}/{arg2}",
        ],
        "/foo/bar"      :: "/foo/bar"          => {},
        "/foo/baz"      :: "/foo/{id}"         => { "id" => "baz" },
        "/foo/"         :: ""                  => None,
        "/foo/a/b"      :: ""                  => None,
        "/path/42"      :: "/path/{id}"        => { "id" => "42" },
        "/path/42/99"   :: "/path/{id}/{arg2}" => { "id" => "42", "arg2" => "99" },
        "/path/42/99/"  :: ""                  => None,
        "/path//99"     :: ""                  => None,
    },
    empty_segments {
        routes = [
            "/a//b",
            "/trailing/",
            "/trailing",
            "//",
            "/{x}/",
        ],
        "/a//b"        :: "/a//b"      => {},
        "/a/b"         :: ""           => None,
        "/trailing/"   :: "/trailing/" => {},
        "/trailing"    :: "/trailing"  => {},
        "/trailing//"  :: ""           => None,
        "//"           :: "//"         => {},
        "/x/"          :: "/{x}/"      => { "x" => "x" },
        "/a/"          :: "/{x}/"      => { "x" => "a" },
        "/"            :: ""           => None,
    },
}

#[test]
fn methods() {
    let mut tree = Tree::new();
    tree.insert(Method::Get, "/", "get root").unwrap();
    tree.insert(Method::Post, "/", "post root").unwrap();
    tree.insert(Method::Put | Method::Patch, "/foo", "put or patch foo").unwrap();
    tree.insert(Method::Get, "/foo/{id}", "get foo").unwrap();
    tree.insert(Method::Delete, "/foo/bar", "delete bar").unwrap();
    tree.insert_path("/any", "any").unwrap();

    let matcher = tree.compile().unwrap();
    let at = |method, path| matcher.at(method, path).map(|m| *m.value);

    assert_eq!(at(Method::Get, "/"), Some("get root"));
    assert_eq!(at(Method::Post, "/"), Some("post root"));
    assert_eq!(at(Method::Put, "/"), None);
    assert_eq!(at(Method::Put, "/foo"), Some("put or patch foo"));
    assert_eq!(at(Method::Patch, "/foo"), Some("put or patch foo"));
    assert_eq!(at(Method::Get, "/foo"), None);
    assert_eq!(at(Method::Delete, "/foo/bar"), Some("delete bar"));
    // the literal route exists only for DELETE, so GET falls back to the placeholder
    assert_eq!(at(Method::Get, "/foo/bar"), Some("get foo"));
    assert_eq!(at(Method::Post, "/foo/bar"), None);

    for method in Method::ALL {
        assert_eq!(at(method, "/any"), Some("any"));
    }

    assert_eq!(at(Method::Unrecognized, "/any"), None);
    assert_eq!(at(Method::parse("BREW"), "/"), None);
}

#[test]
fn allowed() {
    let mut tree = Tree::new();
    tree.insert(Method::Get, "/users/{id}", ()).unwrap();
    tree.insert(Method::Delete, "/users/{id}", ()).unwrap();
    tree.insert(Method::Post, "/users/new", ()).unwrap();

    let matcher = tree.compile().unwrap();

    assert_eq!(matcher.allowed("/users/1"), Method::Get | Method::Delete);
    assert_eq!(
        matcher.allowed("/users/new"),
        Method::Get | Method::Delete | Method::Post
    );
    assert_eq!(matcher.allowed("/users"), Methods::EMPTY);
    assert_eq!(matcher.allowed("users/1"), Methods::EMPTY);
}

#[test]
fn match_entry_is_reset() {
    let mut tree = Tree::new();
    tree.insert(Method::Get, "/a/{x}/{y}", 1).unwrap();
    tree.insert(Method::Get, "/b", 2).unwrap();

    let matcher = tree.compile().unwrap();

    let mut entry = pathtrie::MatchEntry::new(Method::Get, "/a/1/2");
    assert_eq!(matcher.match_route(&mut entry).map(|r| *r.value()), Some(1));
    assert_eq!(entry.vars().to_vec(), ["1", "2"]);

    // a miss leaves no values behind
    entry.set_method(Method::Post);
    assert!(matcher.match_route(&mut entry).is_none());
    assert!(entry.vars().is_empty());

    let mut entry = pathtrie::MatchEntry::new("GET", "/b");
    assert_eq!(matcher.match_route(&mut entry).map(|r| r.pattern()), Some("/b"));
    assert!(entry.vars().is_empty());
}

// Every registered route, with each placeholder replaced by a distinct value,
// matches itself and captures exactly those values.
#[test]
fn instantiated_routes_match() {
    let routes = [
        "/",
        "/users",
        "/users/",
        "/users/{id}",
        "/users/{id}/posts",
        "/users/{id}/posts/{post}",
        "/users/{id}/posts/{post}/comments/{comment}",
        "/users/me/posts/{post}",
        "/{lang}/docs/{page}",
        "/{lang}/docs",
        "/static/css/site.css",
        "/static/{file}",
    ];

    let mut tree = Tree::new();
    for (i, route) in routes.iter().enumerate() {
        tree.insert(Method::Get | Method::Head, *route, i).unwrap();
    }
    let matcher = tree.compile().unwrap();

    for (i, route) in routes.iter().enumerate() {
        let mut values = Vec::new();
        let path = route
            .split('/')
            .map(|segment| {
                if segment.starts_with('{') {
                    values.push(format!("v{}x{}", i, values.len()));
                    values[values.len() - 1].clone()
                } else {
                    segment.to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join("/");

        for method in [Method::Get, Method::Head] {
            let matched = matcher.at(method, &path).unwrap();
            assert_eq!(*matched.value, i, "{}", path);
            assert_eq!(matched.vars.to_vec(), values, "{}", path);
        }

        assert!(matcher.at(Method::Post, &path).is_none());
    }
}

#[test]
fn backtracked_captures_equal_direct_ones() {
    let mut tree = Tree::new();
    tree.insert(Method::Get, "/s/{b}/{c}/z", 1).unwrap();
    tree.insert(Method::Get, "/{a}/q/r", 2).unwrap();
    let backtracking = tree.compile().unwrap();

    let mut tree = Tree::new();
    tree.insert(Method::Get, "/{a}/q/r", 2).unwrap();
    let direct = tree.compile().unwrap();

    let backtracked = backtracking.at(Method::Get, "/s/q/r").unwrap();
    let matched = direct.at(Method::Get, "/s/q/r").unwrap();

    assert_eq!(*backtracked.value, 2);
    assert_eq!(backtracked.vars, matched.vars);

    // a reused entry compares by its latest captures only
    let mut entry = pathtrie::MatchEntry::new(Method::Get, "/s/q/r");
    backtracking.match_route(&mut entry).unwrap();
    assert_eq!(entry.vars(), &matched.vars);
}
