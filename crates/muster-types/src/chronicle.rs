//! The unit's founding chronicle, shown by `muster history`.

/// Narrative history of the founding roster.
pub const UNIT_HISTORY: &str = "\
The History of the Aldanese Army

Origins at Lunch (11/18/25)
It began humbly, with a devoted group gathered around a lunch table.
The first to rise was Aldan Toba, founding O-10, inspiring the Army's creation.

The First Wave (11/19/25)
Jayden Li, Luca Lewis, and Marcus Stephan joined, formalizing the officer corps and strengthening the foundation.

The Rise of the Joint Chief of Staff
Declan Benito was appointed Joint Chief of Staff (O-10), architecting organization and discipline alongside Aldan Toba.

Expansion of the Enlisted (11/20-11/21/25)
Henry Wang, Luke Lafrancois, and Quinn Tompkins entered as enlisted, proving the Army was open to all loyal followers.

December Recruits (12/1-12/2/25)
Rhodes Kentor and Ethan Long joined; Ethan's quick promotion showed momentum and opportunity.

Legacy and Archives
From a lunch table to a structured force, led by O-10s Aldan Toba and Declan Benito.
";
