//! Procedural macros for the sleigh solver framework

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use syn::{DeriveInput, Lit, parse_macro_input};

/// Derive `sleigh_core::Solver` from a set of `PartSolver<N>` impls.
///
/// The generated `solve_part` forwards part `n` to
/// `<Self as PartSolver<n>>::solve` for every `n` in `1..=parts`, and answers
/// anything else with `SolveError::PartNotImplemented`.
///
/// # Attributes
///
/// - `parts`: Required. Number of parts, between 1 and 25.
///
/// # Example
///
/// ```ignore
/// #[derive(PuzzleSolver)]
/// #[puzzle(parts = 2)]
/// pub struct Solver;
///
/// impl PuzzleParser for Solver { /* ... */ }
/// impl PartSolver<1> for Solver { /* ... */ }
/// impl PartSolver<2> for Solver { /* ... */ }
/// ```
#[proc_macro_derive(PuzzleSolver, attributes(puzzle))]
pub fn derive_puzzle_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("puzzle"))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, "PuzzleSolver requires a #[puzzle(parts = N)] attribute")
        })?;

    let mut parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("parts") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => parts = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "parts must be an integer")),
            }
            Ok(())
        } else {
            Err(meta.error("unsupported puzzle attribute"))
        }
    })?;

    let parts = parts.ok_or_else(|| syn::Error::new_spanned(attr, "missing `parts`"))?;
    if !(1..=25).contains(&parts) {
        return Err(syn::Error::new_spanned(attr, "parts must be between 1 and 25"));
    }

    let arms = (1..=parts).map(|n| {
        let n = Literal::u8_unsuffixed(n);
        quote! {
            #n => <Self as ::sleigh_core::PartSolver<#n>>::solve(shared),
        }
    });
    let parts_lit = Literal::u8_unsuffixed(parts);

    Ok(quote! {
        impl #impl_generics ::sleigh_core::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #parts_lit;

            fn solve_part(
                shared: &mut <Self as ::sleigh_core::PuzzleParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::sleigh_core::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::sleigh_core::SolveError::PartNotImplemented(part)),
                }
            }
        }
    })
}
