use std::{path::PathBuf, sync::Arc};

use prepub_common::Loader;
use prepub_error::Error;
use swc_core::{
  common::{FileName, SourceFile, SourceMap, Span, Spanned},
  ecma::{
    ast::{self, EsVersion},
    parser::{self as swc_ecma_parser, PResult},
  },
};
use swc_ecma_parser::{lexer::Lexer, EsConfig, Parser, StringInput, Syntax, TsConfig};

#[derive(Default)]
pub struct Compiler {
  pub cm: Arc<SourceMap>,
}

impl Compiler {
  pub fn create_source_file(&self, filename: PathBuf, code: String) -> Arc<SourceFile> {
    self.cm.new_source_file(FileName::Real(filename), code)
  }

  pub fn parse(&self, source_file: &SourceFile, syntax: Syntax) -> PResult<ast::Module> {
    let lexer = Lexer::new(
      syntax,
      EsVersion::latest(),
      StringInput::from(source_file),
      None,
    );
    let mut parser = Parser::new_from(lexer);
    // To be clear, prepub will always assume the input is a module
    let module = parser.parse_module()?;
    // Recovered errors still mean the input is malformed, report the first one.
    match parser.take_errors().into_iter().next() {
      Some(err) => Err(err),
      None => Ok(module),
    }
  }

  /// Parse the file and turn a parser failure into a located [Error].
  pub fn parse_by_loader(
    &self,
    source_file: &SourceFile,
    loader: Loader,
  ) -> prepub_error::Result<ast::Module> {
    self
      .parse(source_file, syntax_by_loader(loader))
      .map_err(|err| {
        let (line, column) = self.line_column(err.span());
        Error::parse_js_failed(
          source_file.name.to_string(),
          line,
          column,
          err.into_kind().msg(),
        )
        .context(format!("{loader:?}"))
      })
  }

  /// 1-based line and column of the start of `span`.
  pub fn line_column(&self, span: Span) -> (usize, usize) {
    let loc = self.cm.lookup_char_pos(span.lo);
    (loc.line, loc.col.0 + 1)
  }
}

pub fn syntax_by_loader(loader: Loader) -> Syntax {
  match loader {
    Loader::Js | Loader::Jsx => Syntax::Es(EsConfig {
      jsx: loader.is_jsx(),
      ..Default::default()
    }),
    Loader::Ts | Loader::Tsx | Loader::Dts => Syntax::Typescript(TsConfig {
      tsx: loader.is_jsx(),
      decorators: true,
      dts: matches!(loader, Loader::Dts),
      ..Default::default()
    }),
  }
}
