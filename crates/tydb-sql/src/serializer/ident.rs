use super::{Formatter, Params, ToSql};

/// A quoted identifier.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let quote = f.serializer.dialect.quote();

        f.dst.push(quote);
        for c in self.0.as_ref().chars() {
            // Embedded quotes are doubled
            if c == quote {
                f.dst.push(quote);
            }
            f.dst.push(c);
        }
        f.dst.push(quote);
    }
}
