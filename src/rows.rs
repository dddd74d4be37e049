/// Result of one run: a header naming the columns, then data rows in the
/// order they were found on the page. `N` fixes the arity of every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rows<const N: usize> {
    header: [String; N],
    data: Vec<[String; N]>,
}

impl<const N: usize> Rows<N> {
    pub fn new(header: [&str; N]) -> Self {
        Self {
            header: header.map(str::to_string),
            data: Vec::new(),
        }
    }

    pub fn push(&mut self, row: [String; N]) {
        self.data.push(row);
    }

    pub fn header(&self) -> &[String; N] {
        &self.header
    }

    pub fn data(&self) -> &[[String; N]] {
        &self.data
    }

    /// Header first, then the data rows.
    pub fn records(&self) -> impl Iterator<Item = &[String; N]> {
        std::iter::once(&self.header).chain(self.data.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_comes_first() {
        let mut rows = Rows::new(["Status", "Count"]);
        rows.push(["Final".into(), "3".into()]);
        rows.push(["Total".into(), "3".into()]);

        let firsts = rows.records().map(|r| r[0].as_str()).collect::<Vec<_>>();
        assert_eq!(firsts, vec!["Status", "Final", "Total"]);
        assert_eq!(rows.data().len(), 2);
    }
}
