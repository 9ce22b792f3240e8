//! End-to-end tests of the aggregator as parameter validators use it.
//!
//! Each test models one validation attempt building a fresh [`Prefixed`]
//! list and asserts on the exact rendered text callers compare against.

use std::fmt;

use pretty_assertions::assert_eq;
use serde::Serialize;

use cloud_multierror::{
    fields_of, set_format, BoxError, Fields, Format, MultiError, Prefixed, Structured,
};

#[derive(Debug, Serialize)]
struct FieldError {
    code: &'static str,
    field: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.field)
    }
}

impl std::error::Error for FieldError {}

impl Structured for FieldError {
    fn fields(&self) -> Option<Fields> {
        fields_of(self)
    }
}

/// Minimal stand-in for an API operation's parameters.
struct CreateParams<'a> {
    api: Option<&'a str>,
    region: &'a str,
    template_id: &'a str,
}

impl CreateParams<'_> {
    fn validate(&self) -> Result<(), Prefixed> {
        let mut merr = Prefixed::new("invalid deployment template create params");
        if self.api.is_none() {
            merr.append("api reference is required for the operation");
        }
        if self.region.is_empty() {
            merr.append("region not specified and is required for this operation");
        }
        if self.template_id.len() != 32 {
            merr.append("id must consist of 32 characters");
        }
        merr.into_result()
    }
}

#[test]
fn valid_params_produce_no_error() {
    let params = CreateParams {
        api: Some("handle"),
        region: "us-east-1",
        template_id: "0123456789abcdef0123456789abcdef",
    };
    assert!(params.validate().is_ok());
}

#[test]
fn invalid_params_render_exact_text() {
    let params = CreateParams {
        api: None,
        region: "",
        template_id: "short",
    };
    let err = params.validate().unwrap_err();
    let expected = concat!(
        "invalid deployment template create params: 3 errors occurred:\n",
        "\t* api reference is required for the operation\n",
        "\t* region not specified and is required for this operation\n",
        "\t* id must consist of 32 characters\n",
        "\n",
    );
    assert_eq!(err.to_string(), expected);
}

#[test]
fn nested_validation_is_prefixed_once_per_level() {
    let params = CreateParams {
        api: Some("handle"),
        region: "",
        template_id: "0123456789abcdef0123456789abcdef",
    };
    let mut merr = Prefixed::new("deployment create");
    merr.append_all(params.validate().err());
    merr.append("name is required");

    assert_eq!(
        merr.to_string(),
        "deployment create: 2 errors occurred:\n\
         \t* invalid deployment template create params: \
         region not specified and is required for this operation\n\
         \t* name is required\n\n",
    );
}

#[test]
fn nested_single_error() {
    let outer = Prefixed::with_errors("outer", [Prefixed::with_errors("inner", ["x"])]);
    assert_eq!(outer.to_string(), "outer: 1 error occurred:\n\t* inner: x\n\n");
}

#[test]
fn every_leaf_of_a_deep_tree_is_flattened() {
    let level3 = Prefixed::with_errors("l3", ["a", "b"]);
    let mut level2 = Prefixed::with_errors("l2", [level3]);
    level2.append("c");
    let mut level1 = Prefixed::new("l1");
    level1.append(level2).append("d");

    let messages: Vec<String> = level1.iter().map(ToString::to_string).collect();
    assert_eq!(messages, ["l2: l3: a", "l2: l3: b", "l2: c", "d"]);
    assert!(level1
        .iter()
        .all(|err| !err.is::<Prefixed>() && !err.is::<MultiError>()));
}

#[test]
fn json_output_of_plain_errors() {
    let mut err: BoxError = Box::new(Prefixed::with_errors("cfg", ["a", "b"]));
    set_format(&mut err, "json");

    let rendered = err.to_string();
    let body = rendered.strip_prefix("cfg: ").expect("prefix is kept");
    let doc: serde_json::Value = serde_json::from_str(body).expect("valid JSON");
    assert_eq!(
        doc,
        serde_json::json!({ "errors": [{ "message": "a" }, { "message": "b" }] }),
    );
}

#[test]
fn json_output_mixes_structured_and_plain_errors() {
    let mut inner = Prefixed::new("fields");
    inner.append_structured(FieldError {
        code: "missing",
        field: "region",
    });

    let mut merr = Prefixed::new("params");
    merr.append("plain").append(inner);
    merr.set_format(Format::Json);

    let rendered = merr.to_string();
    let doc: serde_json::Value =
        serde_json::from_str(rendered.strip_prefix("params: ").unwrap()).unwrap();
    assert_eq!(
        doc,
        serde_json::json!({
            "errors": [
                { "message": "plain" },
                { "code": "missing", "field": "region" }
            ]
        }),
    );

    // Text rendering of the same list still shows the label.
    merr.set_format(Format::Text);
    assert_eq!(
        merr.to_string(),
        "params: 2 errors occurred:\n\t* plain\n\t* fields: missing: region\n\n",
    );
}

#[test]
fn appending_none_never_changes_the_length() {
    let mut merr = Prefixed::with_errors("p", None::<BoxError>);
    merr.append_all(None::<&str>);
    assert!(merr.is_empty());
    assert!(merr.error_or_none().is_none());
}
