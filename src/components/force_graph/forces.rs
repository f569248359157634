//! Layout forces applied on top of the charge/spring solver.

/// Pushes apart every pair of nodes closer than `2 * radius`. Pinned nodes
/// stay put and their partner takes the whole correction.
pub fn collide(positions: &mut [(f32, f32)], pinned: &[bool], radius: f32) {
	let min_dist = 2.0 * radius;
	for i in 0..positions.len() {
		for j in (i + 1)..positions.len() {
			let (pi, pj) = (pinned[i], pinned[j]);
			if pi && pj {
				continue;
			}
			let (dx, dy) = (positions[j].0 - positions[i].0, positions[j].1 - positions[i].1);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist >= min_dist {
				continue;
			}
			let (ux, uy) = if dist < 1e-3 {
				// Coincident nodes: separate along a per-pair direction.
				let angle = (i * 31 + j * 17) as f32;
				(angle.cos(), angle.sin())
			} else {
				(dx / dist, dy / dist)
			};
			let overlap = min_dist - dist;
			let (share_i, share_j) = match (pi, pj) {
				(true, false) => (0.0, 1.0),
				(false, true) => (1.0, 0.0),
				_ => (0.5, 0.5),
			};
			positions[i].0 -= ux * overlap * share_i;
			positions[i].1 -= uy * overlap * share_i;
			positions[j].0 += ux * overlap * share_j;
			positions[j].1 += uy * overlap * share_j;
		}
	}
}

/// Translates the free nodes so the centroid of the whole set moves to
/// `(cx, cy)`.
pub fn center(positions: &mut [(f32, f32)], pinned: &[bool], cx: f32, cy: f32) {
	if positions.is_empty() {
		return;
	}
	let n = positions.len() as f32;
	let (sx, sy) = positions.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
	let (shift_x, shift_y) = (cx - sx / n, cy - sy / n);
	for (p, &is_pinned) in positions.iter_mut().zip(pinned) {
		if !is_pinned {
			p.0 += shift_x;
			p.1 += shift_y;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
		((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
	}

	#[test]
	fn test_overlapping_nodes_separate() {
		let mut positions = vec![(0.0, 0.0), (4.0, 0.0)];
		collide(&mut positions, &[false, false], 10.0);
		assert!((dist(positions[0], positions[1]) - 20.0).abs() < 1e-3);
		// Both moved by the same amount.
		assert!((positions[0].0 + 8.0).abs() < 1e-3);
	}

	#[test]
	fn test_pinned_node_does_not_move() {
		let mut positions = vec![(0.0, 0.0), (4.0, 0.0)];
		collide(&mut positions, &[true, false], 10.0);
		assert_eq!(positions[0], (0.0, 0.0));
		assert!((positions[1].0 - 20.0).abs() < 1e-3);
	}

	#[test]
	fn test_coincident_nodes_separate() {
		let mut positions = vec![(5.0, 5.0), (5.0, 5.0)];
		collide(&mut positions, &[false, false], 10.0);
		assert!(dist(positions[0], positions[1]) > 19.0);
	}

	#[test]
	fn test_far_nodes_untouched() {
		let mut positions = vec![(0.0, 0.0), (100.0, 0.0)];
		collide(&mut positions, &[false, false], 10.0);
		assert_eq!(positions, vec![(0.0, 0.0), (100.0, 0.0)]);
	}

	#[test]
	fn test_center_moves_centroid() {
		let mut positions = vec![(10.0, 10.0), (30.0, 10.0)];
		center(&mut positions, &[false, false], 0.0, 0.0);
		assert_eq!(positions, vec![(-10.0, 0.0), (10.0, 0.0)]);
	}

	#[test]
	fn test_center_skips_pinned() {
		let mut positions = vec![(10.0, 10.0), (30.0, 10.0)];
		center(&mut positions, &[true, false], 0.0, 0.0);
		assert_eq!(positions[0], (10.0, 10.0));
		assert_eq!(positions[1], (10.0, 0.0));
	}
}
