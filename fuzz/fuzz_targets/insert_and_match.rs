#![no_main]
use libfuzzer_sys::fuzz_target;
use pathtrie::{Method, Tree};

fuzz_target!(|data: (Vec<(u8, String, i32)>, u8, String)| {
    let mut tree = Tree::new();

    for (method, route, item) in data.0 {
        let method = Method::ALL[usize::from(method) % Method::ALL.len()];
        if tree.insert(method, route, item).is_err() {
            return;
        }
    }

    let matcher = match tree.compile() {
        Ok(matcher) => matcher,
        Err(_) => return,
    };

    let method = Method::ALL[usize::from(data.1) % Method::ALL.len()];
    if let Some(matched) = matcher.at(method, &data.2) {
        assert_eq!(matched.vars.len(), matched.route.param_names().len());
    }
    let _ = matcher.allowed(&data.2);
});
