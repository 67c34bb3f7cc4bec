mod clean_up;
mod lsp;
mod materialize;
mod preview;
mod properties;
mod proposals;
mod scenarios;
mod support;
