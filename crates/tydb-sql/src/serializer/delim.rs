use super::{Formatter, Params, ToSql};

/// Items joined by a separator.
pub(super) struct Delimited<L>(pub(super) L, pub(super) &'static str);

/// Items joined by `", "`.
pub(super) fn comma<L>(items: L) -> Delimited<L> {
    Delimited(items, ", ")
}

impl<L> ToSql for Delimited<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        for (i, item) in self.0.into_iter().enumerate() {
            if i > 0 {
                f.dst.push_str(self.1);
            }
            item.to_sql(f);
        }
    }
}
