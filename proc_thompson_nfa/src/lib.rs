use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, LitStr};
use thompson_nfa_transformer::{to_automaton, Description, Symbol, TransitionGroup};

/// Builds the automaton for a pattern at compile time and expands to its
/// `thompson_nfa_transformer::Description`. A malformed pattern is a
/// compile error.
#[proc_macro]
pub fn nfa(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let pattern = parse_macro_input!(input as LitStr);

    match to_automaton(&pattern.value()) {
        Ok(automaton) => {
            let fnl = Final {
                description: automaton.describe(),
            };
            quote! { #fnl }.into()
        }
        Err(e) => syn::Error::new(pattern.span(), format!("invalid pattern: {e}"))
            .to_compile_error()
            .into(),
    }
}

struct Final {
    description: Description,
}

impl ToTokens for Final {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let d = &self.description;
        let states = &d.states;
        let (start, accept) = (d.start, d.accept);
        let alphabet = &d.alphabet;
        let groups = d.transitions.iter().map(Group);

        tokens.extend(quote! {
            ::thompson_nfa_transformer::Description {
                states: vec![#(#states),*],
                start: #start,
                accept: #accept,
                alphabet: vec![#(#alphabet),*],
                transitions: vec![#(#groups),*],
            }
        });
    }
}

struct Group<'a>(&'a TransitionGroup);

impl ToTokens for Group<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let TransitionGroup { source, symbol, targets } = self.0;
        let symbol = SymbolLit(*symbol);

        tokens.extend(quote! {
            ::thompson_nfa_transformer::TransitionGroup {
                source: #source,
                symbol: #symbol,
                targets: vec![#(#targets),*],
            }
        });
    }
}

struct SymbolLit(Symbol);

impl ToTokens for SymbolLit {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self.0 {
            Symbol::Epsilon => {
                tokens.extend(quote! { ::thompson_nfa_transformer::Symbol::Epsilon })
            }
            Symbol::Literal(c) => {
                tokens.extend(quote! { ::thompson_nfa_transformer::Symbol::Literal(#c) })
            }
        }
    }
}
