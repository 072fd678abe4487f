use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first), yielding each node together with its path from the root.
///
/// A path is the list of argument indices to follow from the root to reach the node; the root
/// itself has the empty path. Paths can be resolved with [`Expr::at_path`] and
/// [`Expr::at_path_mut`].
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Each frame holds a node and the index of the next argument to descend into.
    stack: Vec<(&'a Expr, usize)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![(expr, 0)],
        }
    }

    /// Returns the path of the node on top of the stack.
    fn current_path(&self) -> Vec<usize> {
        // every frame below the top has already advanced past the child we are in
        self.stack[..self.stack.len() - 1]
            .iter()
            .map(|(_, next)| next - 1)
            .collect()
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = (Vec<usize>, &'a Expr);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, next) = self.stack.last_mut()?;
            let expr: &'a Expr = *expr;

            if let Expr::Apply(app) = expr {
                if let Some(child) = app.args.get(*next) {
                    *next += 1;
                    self.stack.push((child, 0));
                    continue;
                }
            }

            let path = self.current_path();
            self.stack.pop();
            return Some((path, expr));
        }
    }
}
