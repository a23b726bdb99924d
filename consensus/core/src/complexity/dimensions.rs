use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    iter::Sum,
    ops::{Add, AddAssign, Index, IndexMut},
};

/// The fee axes along which transaction complexity is measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeeDimension {
    Bandwidth = 0,
    DbRead = 1,
    DbWrite = 2,
    Compute = 3,
}

impl FeeDimension {
    pub const ALL: [FeeDimension; 4] = [FeeDimension::Bandwidth, FeeDimension::DbRead, FeeDimension::DbWrite, FeeDimension::Compute];
}

/// A four-axis cost vector. Also used as the weight vector that prices it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub bandwidth: u64,
    pub db_read: u64,
    pub db_write: u64,
    pub compute: u64,
}

impl Dimensions {
    pub const ZERO: Dimensions = Dimensions::new(0, 0, 0, 0);

    pub const fn new(bandwidth: u64, db_read: u64, db_write: u64, compute: u64) -> Self {
        Self { bandwidth, db_read, db_write, compute }
    }

    pub const fn from_bandwidth(bandwidth: u64) -> Self {
        Self::new(bandwidth, 0, 0, 0)
    }

    pub fn checked_add(&self, other: &Dimensions) -> Option<Dimensions> {
        Some(Dimensions {
            bandwidth: self.bandwidth.checked_add(other.bandwidth)?,
            db_read: self.db_read.checked_add(other.db_read)?,
            db_write: self.db_write.checked_add(other.db_write)?,
            compute: self.compute.checked_add(other.compute)?,
        })
    }

    pub fn checked_mul(&self, factor: u64) -> Option<Dimensions> {
        Some(Dimensions {
            bandwidth: self.bandwidth.checked_mul(factor)?,
            db_read: self.db_read.checked_mul(factor)?,
            db_write: self.db_write.checked_mul(factor)?,
            compute: self.compute.checked_mul(factor)?,
        })
    }

    /// Sums `items`, `None` if any axis overflows.
    pub fn checked_sum(items: impl IntoIterator<Item = Dimensions>) -> Option<Dimensions> {
        items.into_iter().try_fold(Dimensions::ZERO, |total, dims| total.checked_add(&dims))
    }

    /// Weighted sum of all axes. `None` on overflow.
    pub fn to_gas(&self, weights: &Dimensions) -> Option<u64> {
        FeeDimension::ALL.iter().try_fold(0u64, |gas, &dim| gas.checked_add(self[dim].checked_mul(weights[dim])?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeeDimension, u64)> + '_ {
        FeeDimension::ALL.iter().map(move |&dim| (dim, self[dim]))
    }
}

impl Index<FeeDimension> for Dimensions {
    type Output = u64;

    fn index(&self, index: FeeDimension) -> &Self::Output {
        match index {
            FeeDimension::Bandwidth => &self.bandwidth,
            FeeDimension::DbRead => &self.db_read,
            FeeDimension::DbWrite => &self.db_write,
            FeeDimension::Compute => &self.compute,
        }
    }
}

impl IndexMut<FeeDimension> for Dimensions {
    fn index_mut(&mut self, index: FeeDimension) -> &mut Self::Output {
        match index {
            FeeDimension::Bandwidth => &mut self.bandwidth,
            FeeDimension::DbRead => &mut self.db_read,
            FeeDimension::DbWrite => &mut self.db_write,
            FeeDimension::Compute => &mut self.compute,
        }
    }
}

impl From<[u64; 4]> for Dimensions {
    fn from(v: [u64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

// Addition saturates; fee paths use `checked_add` and report overflow.

impl Add for Dimensions {
    type Output = Dimensions;

    fn add(self, rhs: Self) -> Self::Output {
        Dimensions {
            bandwidth: self.bandwidth.saturating_add(rhs.bandwidth),
            db_read: self.db_read.saturating_add(rhs.db_read),
            db_write: self.db_write.saturating_add(rhs.db_write),
            compute: self.compute.saturating_add(rhs.compute),
        }
    }
}

impl AddAssign for Dimensions {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Dimensions {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dimensions::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Dimensions> for Dimensions {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[bandwidth: {}, db read: {}, db write: {}, compute: {}]", self.bandwidth, self.db_read, self.db_write, self.compute)
    }
}
