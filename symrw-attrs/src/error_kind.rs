use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{Data, DeriveInput, Expr, Fields, Ident, Result};

/// The tags of the `error` attribute.
#[derive(Debug, Default)]
struct ErrorArgs {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

/// A struct deriving `ErrorKind`.
#[derive(Debug)]
pub struct ErrorKindTarget {
    name: Ident,

    /// Names of the fields that are brought into scope for the tag expressions.
    fields: Vec<Ident>,
    args: ErrorArgs,
}

impl TryFrom<DeriveInput> for ErrorKindTarget {
    type Error = syn::Error;

    fn try_from(input: DeriveInput) -> Result<Self> {
        let Data::Struct(data) = input.data else {
            return Err(syn::Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs"));
        };

        let fields = match data.fields {
            Fields::Named(named) => named.named.into_iter().filter_map(|field| field.ident).collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(unnamed, "`ErrorKind` cannot be derived for tuple structs"));
            },
        };

        let mut args = ErrorArgs::default();
        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("error")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("message") {
                    &mut args.message
                } else if meta.path.is_ident("labels") {
                    &mut args.labels
                } else if meta.path.is_ident("help") {
                    &mut args.help
                } else {
                    return Err(meta.error("expected `message`, `labels` or `help`"));
                };
                *slot = Some(meta.value()?.parse()?);
                Ok(())
            })?;
        }

        if args.message.is_none() {
            return Err(syn::Error::new_spanned(&input.ident, "missing `message` tag in `error` attribute"));
        }

        Ok(Self { name: input.ident, fields, args })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let name = &self.name;
        let fields = &self.fields;
        let bind_fields = if fields.is_empty() {
            quote! {}
        } else {
            quote! {
                #[allow(unused_variables)]
                let #name { #(#fields),* } = self;
            }
        };

        let message = &self.args.message;
        let labels = match &self.args.labels {
            Some(labels) => quote! { (#labels).into_iter().map(|label| label.to_string()).collect::<Vec<String>>() },
            None => quote! { Vec::<String>::new() },
        };
        let help = self.args.help.as_ref().map(|help| quote! { report.set_help(#help); });

        tokens.extend(quote! {
            impl symrw_error::ErrorKind for #name {
                fn as_any(&self) -> &dyn std::any::Any {
                    self
                }

                fn message(&self) -> String {
                    #bind_fields
                    (#message).to_string()
                }

                fn build_report<'a>(
                    &self,
                    src_id: &'a str,
                    spans: &[std::ops::Range<usize>],
                ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                    #bind_fields
                    let labels = #labels;

                    // labels beyond the number of spans have nothing to point at
                    let labels = spans.iter().cloned().zip(labels).map(|(span, text)| {
                        let label = ariadne::Label::new((src_id, span)).with_color(symrw_error::EXPR);
                        if text.is_empty() { label } else { label.with_message(text) }
                    });

                    let offset = spans.first().map_or(0, |span| span.start);
                    #[allow(unused_mut)]
                    let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                        .with_message(#message)
                        .with_labels(labels);
                    #help
                    report.finish()
                }
            }
        });
    }
}
