mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `symrw_error::ErrorKind` trait for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use symrw_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array of label texts, one for each span the error points at, in order.    |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. `message` and `help` must evaluate to something that
/// implements [`ToString`], and `labels` to an iterable of such values. For structs with named
/// fields, the expressions are evaluated with references to the fields of the struct in scope
/// (tuple structs are not supported).
///
/// Errors raised by the rewriting engine usually have no source code to point at. In that case
/// the error is built with no spans, and the labels are silently dropped.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match ErrorKindTarget::try_from(input) {
        Ok(target) => target.into_token_stream().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
