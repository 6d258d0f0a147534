//! Coefficient tables for the band-splitting filter banks.
//!
//! Every table describes an orthogonal lapped bank: the filters, shifted by
//! multiples of the band count, form an orthonormal set. Analysis with the
//! filters and synthesis with their transposes therefore reconstruct the
//! input delayed by `filter length - band count` samples.

/// Lowpass of the 2-band bank.
///
/// A minimum-phase spectral factor of a 95-tap Kaiser (β = 8) half-band
/// filter. The highpass is its alternating flip, `h1[n] = (-1)^n h0[47 - n]`.
#[rustfmt::skip]
pub(crate) const TWO_BAND_LOWPASS: [f32; 48] = [
    0.16375254, 0.47822952, 0.6485292, 0.38365984, -0.10025245, -0.27027875,
    -0.021140847, 0.18435363, 0.051841166, -0.1315571, -0.056546383, 0.098283075,
    0.052810334, -0.07624763, -0.046371277, 0.060884137, 0.039328415, -0.049628973,
    -0.032503497, 0.04099532, 0.026227996, -0.03409592, -0.02063198, 0.028390754,
    0.015756998, -0.023547882, -0.011601932, 0.019363198, 0.008142131, -0.015712023,
    -0.0053377375, 0.012518699, 0.0031378462, -0.009736861, -0.0014833121, 0.007336345,
    0.00030938495, -0.005294547, 0.00045130873, 0.0035909947, -0.00086515985, -0.002204701,
    0.0009929945, 0.0011148594, -0.0008837671, -0.00030824894, 0.00056488055, -0.0001934231,];

/// Filters of the 3-band bank, low to high.
///
/// The lowpass is a 48-tap spectral factor of a Kaiser (β = 8) third-band
/// Nyquist filter, zero-padded. The two upper filters complete its polyphase
/// row to a paraunitary 3 × 3 matrix, then a 25-stage rotation lattice trades
/// them off until each stops the bands it does not own.
#[rustfmt::skip]
pub(crate) const THREE_BAND_FILTERS: [[f32; 120]; 3] = [
    [
        0.09259264, 0.24860579, 0.43450043, 0.5413495, 0.47731432, 0.24508134,
        -0.038190585, -0.21341974, -0.19572125, -0.038330395, 0.11357483, 0.14220156,
        0.04709594, -0.06990671, -0.10465007, -0.04089623, 0.04805756, 0.07798605,
        0.03161453, -0.035671145, -0.058146216, -0.022583319, 0.027682917, 0.04281888,
        0.014845636, -0.021841845, -0.03074369, -0.008703631, 0.017123194, 0.021219462,
        0.0041659097, -0.013082918, -0.013823265, -0.0010971902, 0.009559674, 0.008256206,
        -0.00071703026, -0.0065208045, -0.004263635, 0.0015281381, 0.003975904, 0.0016033702,
        -0.0015834133, -0.0019291064, -5.7451132e-5, 0.001071005, 0.00037767508, -0.00044432498,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    [
        -1.0638623e-8, 1.5713239e-8, -1.2287223e-8, -6.1551316e-7, 9.2918043e-7, -7.2255807e-7,
        2.3114904e-5, -3.2969176e-5, 2.600505e-5, -0.00013781337, 0.00016055626, -0.00013481431,
        -0.00028119737, 0.00065281487, -0.0004386913, -0.00072175486, 0.0017243652, -0.0013683648,
        -0.0016523909, 0.0040964885, -0.0030810328, -0.004698341, 0.011097438, -0.00861696,
        -0.0038055957, 0.016318353, -0.012516979, -0.006126535, 0.022461655, -0.018875634,
        -0.007119636, 0.029078474, -0.024726333, -0.0074802283, 0.03497955, -0.028369993,
        -0.0056407284, 0.03727649, -0.035060525, -0.0083009275, 0.03580343, -0.028983561,
        0.0037885807, 0.033101592, -0.03393661, -0.007986976, 0.012874062, -0.0121243205,
        0.02242729, 0.0033783233, -0.005905292, 0.008102214, -0.065449715, 0.009861279,
        0.096935436, -0.047054086, -0.0062167193, 0.047333, -0.15589654, 0.030865029,
        0.22974162, -0.16623694, -0.10852079, 0.29846752, -0.12942928, -0.37908784,
        0.28535688, 0.39672565, -0.23530121, -0.36117414, 0.025880111, 0.2566188,
        0.14814876, -0.11810777, -0.18944861, -0.020867426, 0.10359825, 0.09916164,
        0.0063780043, -0.0849901, -0.06313136, 0.02892644, 0.05597073, 0.013801906,
        -0.030732298, -0.017457956, 0.00802494, 0.0032387543, 0.0094806235, -0.00021521442,
        -0.014616276, 0.004386885, 0.010530897, -0.007965785, 0.0012552837, 0.003236559,
        -0.00839757, 0.004445571, 0.0064696763, -0.0076382947, 0.0010410295, 0.004154034,
        -0.005177209, 0.001534102, 0.003468645, -0.0035937969, 0.00034633273, 0.0020986302,
        -0.0018449106, 4.1066727e-5, 0.0011466112, -0.00048921845, -0.00023665269, 0.00016981155,
        5.0792565e-5, 1.7064973e-5, -2.1513237e-5, 6.612615e-7, 2.3318472e-7, -2.743358e-7,
    ],
    [
        -7.1188555e-7, 1.0514543e-6, -8.222019e-7, -5.314416e-5, 7.983673e-5, -6.215998e-5,
        0.0006423844, -0.00084785395, 0.000682529, 0.0006729068, -0.002153169, 0.0013963259,
        0.0015833174, -0.0042190864, 0.003605176, 0.00067855895, -0.0048127947, 0.003378794,
        0.003534448, -0.009239182, 0.008477544, -0.0016034801, -0.00475437, 0.003587478,
        0.005702044, -0.0128373625, 0.010446655, -0.0008517522, -0.00797155, 0.011235513,
        -0.006879456, 0.004442259, -0.014714088, 0.034745824, -0.05202094, 0.068351895,
        -0.088853575, 0.10925795, -0.12476205, 0.13794568, -0.14917041, 0.16975535,
        -0.20476022, 0.23327467, -0.24125895, 0.22832444, -0.20217195, 0.1717843,
        -0.10983329, -0.026432632, 0.21011253, -0.36207303, 0.37251067, -0.18258096,
        -0.08855787, 0.28615013, -0.28328, 0.101863585, 0.0841664, -0.15292674,
        0.0674862, 0.047681976, -0.09750158, 0.04202695, 0.033323925, -0.06130314,
        0.026844878, 0.012832118, -0.020499358, -0.002724342, 0.011730839, 0.0053936415,
        -0.025463007, 0.016607795, 0.015920877, -0.035906907, 0.017012889, 0.022878377,
        -0.040121075, 0.01625696, 0.025301721, -0.039833963, 0.013585955, 0.024896013,
        -0.03508363, 0.0111875525, 0.02200693, -0.029502552, 0.0074071465, 0.018271565,
        -0.021127028, 0.0052805385, 0.012875223, -0.015899112, 0.0031010336, 0.01022493,
        -0.00892166, 7.527888e-5, 0.0049871127, -0.00344376, 0.0001409887, 0.001992695,
        -0.0013908232, 7.872044e-6, 0.00078981166, -0.00050862215, -4.599908e-5, 0.00028927706,
        -8.245223e-5, -5.5719054e-5, 2.0080366e-5, 2.0223213e-5, 7.877478e-6, -8.005268e-6,
        -5.930773e-7, -1.964928e-7, 2.5263972e-7, -9.882083e-9, -3.4847798e-9, 4.0997534e-9,
    ],
];
