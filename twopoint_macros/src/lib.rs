use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Lit, LitFloat, Meta, parse_macro_input, spanned::Spanned};

/// Derive `twopoint::OutcomeEnum` for a fieldless enum whose variants carry
/// `#[mass(<expr>)]` attributes.
///
/// ```rust,ignore
/// #[derive(Copy, Clone, Debug, OutcomeEnum)]
/// enum Weather {
///     #[mass(0.6)]  Sunny,
///     #[mass(0.3)]  Overcast,
///     #[mass(1/10)] Rain, // integer literals are promoted: 1.0/10.0
/// }
///
/// let table = Weather::table()?;
/// ```
#[proc_macro_derive(OutcomeEnum, attributes(mass))]
pub fn derive_outcome_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "OutcomeEnum can only be derived for enums",
        ));
    };

    let mut entries = Vec::new();
    for variant in &data_enum.variants {
        // outcome tables index plain variants; payloads have no meaning here
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "OutcomeEnum only supports fieldless variants",
            ));
        }
        let mass = mass_expr(variant)?;
        let ident = &variant.ident;
        entries.push(quote! { (Self::#ident, (#mass)) });
    }

    Ok(quote! {
        impl twopoint::OutcomeEnum for #enum_ident {
            const MASSES: &'static [(Self, f64)] = &[
                #(#entries),*
            ];
        }

        impl #enum_ident {
            /// Build an `OutcomeTable<#enum_ident>` from the annotated masses.
            pub fn table() -> ::core::result::Result<twopoint::OutcomeTable<Self>, twopoint::DistError>
            where
                Self: ::core::marker::Copy,
            {
                <Self as twopoint::OutcomeEnum>::table()
            }
        }
    })
}

/// Pull the `#[mass(...)]` expression off a variant.
fn mass_expr(variant: &syn::Variant) -> syn::Result<Expr> {
    for attr in &variant.attrs {
        if !attr.path().is_ident("mass") {
            continue;
        }
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new(attr.meta.span(), "use #[mass(<expr>)]"));
        };
        let expr = syn::parse2::<Expr>(list.tokens.clone())
            .map_err(|e| syn::Error::new(list.span(), format!("invalid mass expr: {e}")))?;
        return Ok(promote_ints(expr));
    }
    Err(syn::Error::new(
        variant.span(),
        "missing #[mass(...)] on variant",
    ))
}

/// Rewrite integer literals to floats (1 -> 1.0) so expressions like `1/10`
/// divide in f64 rather than truncating.
fn promote_ints(mut e: Expr) -> Expr {
    match e {
        Expr::Lit(ref mut el) => {
            if let Lit::Int(int) = &el.lit {
                let s = format!("{}.0", int.base10_digits());
                el.lit = Lit::Float(LitFloat::new(&s, int.span()));
            }
            e
        }
        Expr::Binary(mut b) => {
            b.left = Box::new(promote_ints(*b.left));
            b.right = Box::new(promote_ints(*b.right));
            Expr::Binary(b)
        }
        Expr::Paren(mut p) => {
            p.expr = Box::new(promote_ints(*p.expr));
            Expr::Paren(p)
        }
        Expr::Unary(mut u) => {
            u.expr = Box::new(promote_ints(*u.expr));
            Expr::Unary(u)
        }
        Expr::Group(mut g) => {
            g.expr = Box::new(promote_ints(*g.expr));
            Expr::Group(g)
        }
        _ => e,
    }
}
