//!
//! Utilities for handling signature strings
//!

use crate::{Error, Result};
use std::fmt::Write;

/// Name of the pseudo-header binding the signature to the request line
pub const REQUEST_TARGET: &str = "(request-target)";

/// Construct the signature string for the given ordered list of header names
///
/// Lines are `<lowercased name>: <value>`, joined by a single newline.
/// Header values are used verbatim. Repeated headers are joined by `, `
#[inline]
pub fn construct<B, I>(request: &http::Request<B>, headers: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut signature_string = String::new();
    for name in headers {
        let name = name.as_ref();

        if name == REQUEST_TARGET {
            let method = request.method().as_str().to_lowercase();
            let path_and_query = request.uri().path_and_query().map_or_else(
                || request.uri().path(),
                |path_and_query| path_and_query.as_str(),
            );

            let _ = writeln!(signature_string, "{name}: {method} {path_and_query}");
            continue;
        }

        let mut values = request.headers().get_all(name).iter().peekable();
        if values.peek().is_none() {
            return Err(Error::MissingHeader(name.to_owned()));
        }

        let value = values
            .map(http::HeaderValue::to_str)
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");

        let _ = writeln!(signature_string, "{}: {value}", name.to_lowercase());
    }

    // Remove the last new-line
    signature_string.pop();

    Ok(signature_string)
}

#[cfg(test)]
mod test {
    use crate::Error;
    use http::{HeaderValue, Method, Request, Uri};

    const BASIC_SIGNATURE_STRING: &str = "(request-target): get /foo?param=value&pet=dog\nhost: example.com\ndate: Sun, 05 Jan 2014 21:31:40 GMT";
    const ALL_HEADERS_SIGNATURE_STRING: &str = "(request-target): post /foo?param=value&pet=dog\nhost: example.com\ndate: Sun, 05 Jan 2014 21:31:40 GMT\ncontent-type: application/json\ndigest: SHA-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=\ncontent-length: 18";

    fn request(method: Method) -> Request<()> {
        Request::builder()
            .method(method)
            .uri(Uri::from_static("/foo?param=value&pet=dog"))
            .header("Host", "example.com")
            .header("Date", "Sun, 05 Jan 2014 21:31:40 GMT")
            .header("Content-Type", "application/json")
            .header(
                "Digest",
                "SHA-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=",
            )
            .header("Content-Length", "18")
            .body(())
            .unwrap()
    }

    #[test]
    fn basic_signature_string() {
        let request = request(Method::GET);
        let signature_string =
            super::construct(&request, ["(request-target)", "host", "date"]).unwrap();

        assert_eq!(signature_string, BASIC_SIGNATURE_STRING);
    }

    #[test]
    fn all_headers_signature_string() {
        let request = request(Method::POST);
        let signature_string = super::construct(
            &request,
            [
                "(request-target)",
                "host",
                "date",
                "content-type",
                "digest",
                "content-length",
            ],
        )
        .unwrap();

        assert_eq!(signature_string, ALL_HEADERS_SIGNATURE_STRING);
    }

    #[test]
    fn names_are_case_insensitive() {
        let request = request(Method::GET);
        let signature_string = super::construct(&request, ["HOST", "Date"]).unwrap();

        assert_eq!(
            signature_string,
            "host: example.com\ndate: Sun, 05 Jan 2014 21:31:40 GMT"
        );
    }

    #[test]
    fn absolute_uri_uses_path_and_query() {
        let request = Request::get("http://example.com/test")
            .header("date", "2018-04-01T12:00:00.000Z")
            .body(())
            .unwrap();

        let signature_string = super::construct(&request, ["(request-target)", "date"]).unwrap();
        assert_eq!(
            signature_string,
            "(request-target): get /test\ndate: 2018-04-01T12:00:00.000Z"
        );
    }

    #[test]
    fn order_matters() {
        let request = request(Method::GET);
        let forward = super::construct(&request, ["(request-target)", "date"]).unwrap();
        let backward = super::construct(&request, ["date", "(request-target)"]).unwrap();

        assert_ne!(forward, backward);
    }

    #[test]
    fn repeated_headers_are_joined() {
        let request = Request::get("/")
            .header("cache-control", "no-cache")
            .header("cache-control", "max-age=0")
            .body(())
            .unwrap();

        let signature_string = super::construct(&request, ["cache-control"]).unwrap();
        assert_eq!(signature_string, "cache-control: no-cache, max-age=0");
    }

    #[test]
    fn missing_header() {
        let request = request(Method::GET);
        let result = super::construct(&request, ["(request-target)", "x-missing"]);

        assert!(matches!(result, Err(Error::MissingHeader(ref name)) if name == "x-missing"));
    }

    #[test]
    fn non_visible_ascii_value() {
        let mut request = request(Method::GET);
        request
            .headers_mut()
            .insert("x-name", HeaderValue::from_bytes(b"caf\xe9").unwrap());

        assert!(matches!(
            super::construct(&request, ["x-name"]),
            Err(Error::InvalidHeaderValue(..))
        ));
    }

    #[test]
    fn empty_list_is_empty_string() {
        let request = request(Method::GET);
        assert_eq!(super::construct(&request, [] as [&str; 0]).unwrap(), "");
    }
}
