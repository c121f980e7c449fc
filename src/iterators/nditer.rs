use crate::dimension::{broadcast_all, broadcast_strides, Shape, Strides};
use crate::error::{shape_mismatch, NdError, NdResult};
use crate::layout::Strided;

/// Lockstep iteration over several strided views under broadcasting.
///
/// The operands' shapes are reconciled to one broadcast shape, which is
/// walked in row major order. Each step yields one absolute element offset
/// per operand, computed with that operand's own strides; axes an operand is
/// broadcast along have stride zero for it, so its offset does not move along
/// them.
///
/// The iterator is finite (exactly as many steps as the broadcast shape has
/// elements, none if an axis is zero) and can be restarted with
/// [`reset`](NdIter::reset).
///
/// ```
/// use ndengine::{Array, NdIter};
///
/// let a = Array::from_shape_vec((2, 3), vec![0, 1, 2, 3, 4, 5]).unwrap();
/// let b = Array::from_vec(vec![10, 20, 30]);
/// let mut it = NdIter::new(&[&a, &b]).unwrap();
/// assert_eq!(it.shape(), &[2, 3]);
/// let mut pairs = Vec::new();
/// while let Some(offs) = it.next_offsets() {
///     pairs.push((offs[0], offs[1]));
/// }
/// assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2), (3, 0), (4, 1), (5, 2)]);
/// ```
#[derive(Clone, Debug)]
pub struct NdIter {
    shape: Shape,
    strides: Vec<Strides>,
    starts: Vec<isize>,
    index: Vec<usize>,
    offsets: Vec<isize>,
    size: usize,
    remaining: usize,
    started: bool,
}

impl NdIter {
    /// Create an iterator over the broadcast shape of `operands`.
    ///
    /// **Errors** with `ShapeMismatch` if two operands can't be broadcast
    /// together and `InvalidArgument` if there are no operands.
    pub fn new(operands: &[&dyn Strided]) -> NdResult<Self> {
        let shape = broadcast_all(operands.iter().map(|op| op.shape()))?;
        Self::with_shape(operands, &shape)
    }

    /// Create an iterator over `shape`, which every operand must broadcast to.
    ///
    /// **Errors** with `ShapeMismatch` if an operand does not broadcast to
    /// `shape`.
    pub fn with_shape(operands: &[&dyn Strided], shape: &[usize]) -> NdResult<Self> {
        if operands.is_empty() {
            return Err(NdError::InvalidArgument("iteration needs at least one operand"));
        }
        let strides = operands
            .iter()
            .map(|op| broadcast_strides(op.shape(), op.strides(), shape).map_err(|_| shape_mismatch(op.shape(), shape)))
            .collect::<NdResult<Vec<_>>>()?;
        let starts: Vec<isize> = operands.iter().map(|op| op.offset() as isize).collect();
        let size = shape.iter().product();
        Ok(NdIter {
            shape: Shape::from_slice(shape),
            strides,
            offsets: starts.clone(),
            starts,
            index: vec![0; shape.len()],
            size,
            remaining: size,
            started: false,
        })
    }

    /// The broadcast shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of operands.
    pub fn nops(&self) -> usize {
        self.starts.len()
    }

    /// Broadcast strides of operand `op`.
    pub fn operand_strides(&self, op: usize) -> &[isize] {
        &self.strides[op]
    }

    /// Number of steps left.
    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Multi-index of the position last returned by
    /// [`next_offsets`](NdIter::next_offsets).
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Restart from the first position.
    pub fn reset(&mut self) {
        self.index.iter_mut().for_each(|i| *i = 0);
        self.offsets.copy_from_slice(&self.starts);
        self.remaining = self.size;
        self.started = false;
    }

    /// Step to the next position and return the element offset of every
    /// operand there, or `None` when the iteration is done.
    #[inline]
    pub fn next_offsets(&mut self) -> Option<&[isize]> {
        if self.remaining == 0 {
            return None;
        }
        if self.started {
            self.advance();
        }
        self.started = true;
        self.remaining -= 1;
        Some(&self.offsets)
    }

    #[inline]
    fn advance(&mut self) {
        for ax in (0..self.shape.len()).rev() {
            self.index[ax] += 1;
            for (off, st) in self.offsets.iter_mut().zip(&self.strides) {
                *off += st[ax];
            }
            if self.index[ax] < self.shape[ax] {
                return;
            }
            let n = self.shape[ax] as isize;
            for (off, st) in self.offsets.iter_mut().zip(&self.strides) {
                *off -= st[ax] * n;
            }
            self.index[ax] = 0;
        }
    }

    /// Call `f` with the operand offsets of every remaining position, in row
    /// major order.
    ///
    /// Before the first step, axes that chain contiguously for every operand
    /// are merged and the innermost axis runs as a tight loop; the order of
    /// the positions is the same as with [`next_offsets`](NdIter::next_offsets).
    pub fn for_each<F>(mut self, mut f: F)
    where
        F: FnMut(&[isize]),
    {
        if self.started {
            while let Some(offs) = self.next_offsets() {
                f(offs);
            }
            return;
        }
        if self.size == 0 {
            return;
        }
        let (shape, strides) = self.coalesced();
        let nops = self.starts.len();
        let mut offsets = self.starts.clone();
        let ndim = shape.len();
        if ndim == 0 {
            f(&offsets);
            return;
        }
        let inner_len = shape[ndim - 1];
        let inner_strides: Vec<isize> = strides.iter().map(|s| s[ndim - 1]).collect();
        let outer_shape = &shape[..ndim - 1];
        let mut outer_index = vec![0; ndim - 1];
        loop {
            let row_start = offsets.clone();
            for _ in 0..inner_len {
                f(&offsets);
                for op in 0..nops {
                    offsets[op] += inner_strides[op];
                }
            }
            offsets.copy_from_slice(&row_start);
            let mut done = true;
            for ax in (0..outer_shape.len()).rev() {
                outer_index[ax] += 1;
                for op in 0..nops {
                    offsets[op] += strides[op][ax];
                }
                if outer_index[ax] < outer_shape[ax] {
                    done = false;
                    break;
                }
                let n = outer_shape[ax] as isize;
                for op in 0..nops {
                    offsets[op] -= strides[op][ax] * n;
                }
                outer_index[ax] = 0;
            }
            if done {
                break;
            }
        }
    }

    /// Drop axes of length one and merge neighbouring axes whose strides
    /// chain for every operand.
    fn coalesced(&self) -> (Vec<usize>, Vec<Vec<isize>>) {
        let nops = self.strides.len();
        let mut shape: Vec<usize> = Vec::with_capacity(self.shape.len());
        let mut strides: Vec<Vec<isize>> = vec![Vec::with_capacity(self.shape.len()); nops];
        for (ax, &n) in self.shape.iter().enumerate() {
            if n == 1 {
                continue;
            }
            if let Some(&last_n) = shape.last() {
                let last = shape.len() - 1;
                // the previous axis steps exactly over a whole run of this one
                let mergeable = (0..nops).all(|op| strides[op][last] == self.strides[op][ax] * n as isize);
                if mergeable {
                    shape[last] = last_n * n;
                    for op in 0..nops {
                        strides[op][last] = self.strides[op][ax];
                    }
                    continue;
                }
            }
            shape.push(n);
            for op in 0..nops {
                strides[op].push(self.strides[op][ax]);
            }
        }
        (shape, strides)
    }
}
